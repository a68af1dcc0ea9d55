//! Conversion entry points.
//!
//! [`convert`] produces markup without touching the target component;
//! [`run`] is the full pipeline the CLI drives: convert, splice, and fall
//! back to a `.txt` file beside the document when splicing fails.

use crate::config::ConversionConfig;
use crate::error::Md2TsxError;
use crate::output::{ConversionOutput, ConversionStats, RunOutcome, RunReport};
use crate::pipeline::{images, input, splice, transform};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert a Markdown file to wrapped JSX markup.
///
/// Reads the document once, catalogs its images (creating the images folder
/// when configured to) and transforms it line by line.
///
/// # Errors
/// Returns `Err(Md2TsxError)` when the document is missing or unreadable.
pub fn convert(
    source: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2TsxError> {
    let start = Instant::now();
    let source = source.as_ref();
    info!("Starting conversion: {}", source.display());

    // ── Step 1: Read document ────────────────────────────────────────────
    let doc = input::read_source(source)?;

    // ── Step 2: Catalog images ───────────────────────────────────────────
    let images = images::catalog_document(&doc, config);
    let images_folder = config.images_folder_name(source);
    debug!("Cataloged {} distinct image paths", images.len());

    // ── Step 3: Transform lines ──────────────────────────────────────────
    let transformed = transform::transform_document(&doc.text, &images, config);
    let counts = transformed.counts;

    let stats = ConversionStats {
        source_lines: counts.source_lines,
        markup_lines: counts.markup_lines,
        tables: counts.tables,
        headings: counts.headings,
        images_referenced: counts.images_referenced,
        images_unmapped: counts.images_unmapped,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Converted {} lines into {} lines of markup in {}ms",
        stats.source_lines, stats.markup_lines, stats.duration_ms
    );

    Ok(ConversionOutput {
        markup: transformed.markup,
        images,
        images_folder,
        stats,
    })
}

/// Convert `source` and splice the markup into the component `target_name`.
///
/// A failed splice is not an error: the markup is written to the fallback
/// file instead and the outcome says so.
///
/// # Errors
/// Returns `Err` when the document cannot be read, or when the splice failed
/// and the fallback file could not be written either.
pub fn run(
    source: impl AsRef<Path>,
    target_name: &str,
    config: &ConversionConfig,
) -> Result<RunReport, Md2TsxError> {
    let source = source.as_ref();
    let output = convert(source, config)?;

    let outcome = match splice::splice_into_target(&output.markup, target_name, config) {
        Ok(target) => RunOutcome::Spliced { target },
        Err(e) if !e.is_splice_failure() => return Err(e),
        Err(e) => {
            warn!("Splice failed, writing fallback: {}", e);
            let path = write_fallback(source, &output.markup, config)?;
            RunOutcome::FallbackWritten {
                path,
                reason: e.to_string(),
            }
        }
    };

    Ok(RunReport {
        source: source.to_path_buf(),
        target_name: target_name.to_string(),
        outcome,
        images_folder: output.images_folder,
        stats: output.stats,
    })
}

/// Write `markup` to the fallback file beside `source`.
pub fn write_fallback(
    source: &Path,
    markup: &str,
    config: &ConversionConfig,
) -> Result<PathBuf, Md2TsxError> {
    let path = config.fallback_path(source);
    std::fs::write(&path, markup).map_err(|e| Md2TsxError::FallbackWriteFailed {
        path: path.clone(),
        source: e,
    })?;
    info!("Fallback: Saved converted content to {}", path.display());
    Ok(path)
}
