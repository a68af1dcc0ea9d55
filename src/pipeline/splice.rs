//! Splicing generated markup into a React component.
//!
//! The insertion point is the component's `return ( … )` expression, found
//! with a single regex that requires the closing `)` to be followed only by an
//! optional `;`, whitespace, the function's closing `}` and more whitespace
//! up to end of file. The first such `return (` wins; components with several
//! candidate returns are not disambiguated.
//!
//! Existing JSX inside the parentheses is kept and the new markup is appended
//! after it, so running the tool twice inserts the markup twice.

use crate::config::ConversionConfig;
use crate::error::Md2TsxError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

static RE_RETURN_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(return\s*\()(.*?)(\);?\s*\}\s*$)").unwrap());

/// Indentation applied to every non-blank markup line.
const MARKUP_INDENT: &str = "    ";

/// Placed between the last markup line and the closing `)`.
const CLOSE_INDENT: &str = "  ";

/// Indent each non-blank line of `markup`; blank lines stay as they are.
pub fn indent_markup(markup: &str) -> String {
    markup
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{MARKUP_INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Insert `markup` into the first `return ( … )` anchor of `content`.
///
/// Returns `None` when the anchor is absent. Text before the anchor is
/// copied unchanged.
pub fn splice_markup(content: &str, markup: &str) -> Option<String> {
    let caps = RE_RETURN_ANCHOR.captures(content)?;
    let whole = caps.get(0)?;
    let open = caps.get(1)?.as_str();
    let inner = caps.get(2)?.as_str().trim_end();
    let close = caps.get(3)?.as_str();

    let indented = indent_markup(markup);
    let mut out = String::with_capacity(content.len() + indented.len() + 8);
    out.push_str(&content[..whole.start()]);
    out.push_str(open);
    out.push_str(inner);
    out.push('\n');
    out.push_str(&indented);
    out.push('\n');
    out.push_str(CLOSE_INDENT);
    out.push_str(close);
    out.push_str(&content[whole.end()..]);
    Some(out)
}

/// Splice `markup` into `<project_root>/<contents_dir>/<target_name>.<ext>`.
///
/// The file is left untouched unless the anchor is found; the rewrite goes
/// through a temporary file in the same directory and a rename.
pub fn splice_into_target(
    markup: &str,
    target_name: &str,
    config: &ConversionConfig,
) -> Result<PathBuf, Md2TsxError> {
    let path = config.target_path(target_name);

    if !path.exists() {
        return Err(Md2TsxError::TargetNotFound { path });
    }

    let content =
        std::fs::read_to_string(&path).map_err(|source| Md2TsxError::TargetReadFailed {
            path: path.clone(),
            source,
        })?;

    let Some(updated) = splice_markup(&content, markup) else {
        return Err(Md2TsxError::AnchorNotFound { path });
    };
    debug!(
        "Anchor found in {}; {} -> {} bytes",
        path.display(),
        content.len(),
        updated.len()
    );

    write_atomic(&path, &updated).map_err(|source| Md2TsxError::TargetWriteFailed {
        path: path.clone(),
        source,
    })?;

    info!("Successfully updated {}", path.display());
    Ok(path)
}

/// Replace `path` with `content` via a sibling temp file and rename.
///
/// Symlinks are followed, so the link stays in place and its target is
/// rewritten. The original file's permissions are carried over.
pub fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = std::fs::metadata(&path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }

    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(())
}
