//! CLI binary for md2tsx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig`, runs the pipeline and prints the result.
//!
//! Only argument errors change the exit status. Conversion, splice and
//! fallback failures are reported on stderr and the process still exits 0.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use md2tsx::{convert, run, ConversionConfig, Md2TsxError, RunOutcome};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const EXAMPLE: &str = "Example: md2tsx success.md engineering";

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert success.md and insert it into src/contents/engineering.tsx
  md2tsx success.md engineering

  # Preview the generated JSX without touching any file
  md2tsx --dry-run success.md engineering

  # Machine-readable report
  md2tsx --json success.md engineering

TARGET FILE:
  The target component is <project-root>/src/contents/<TARGET_NAME>.tsx and
  must end with a `return ( … );` expression followed by the function's
  closing brace. The markup is appended inside those parentheses.

  If the target is missing or has no such expression, the markup is saved
  next to the Markdown file as <name>.txt instead.

IMAGES:
  Image files are never copied. A <name>_images/ folder is created and every
  image becomes <img src="" …> with a comment naming the expected file
  (image_01.png, image_02.png, …). Place the files and fill in `src` by hand.

ENVIRONMENT VARIABLES:
  MD2TSX_PROJECT_ROOT     Directory containing src/contents (default: cwd)
  MD2TSX_CONTENTS_DIR     Component directory relative to the project root
  MD2TSX_TARGET_EXT       Component file extension
  MD2TSX_CONTAINER_CLASS  className of the wrapping <div>
  MD2TSX_TABLE_CLASS      className of generated tables
  MD2TSX_IMAGE_CLASS      className of generated images
  MD2TSX_IMAGES_SUFFIX    Images folder suffix (default: _images)
  MD2TSX_IMAGE_EXT        Placeholder image extension (default: png)
  MD2TSX_FALLBACK_EXT     Fallback file extension (default: txt)
  MD2TSX_NO_IMAGES_DIR    Set to true to skip creating the images folder
  RUST_LOG                Override the log filter (e.g. md2tsx=debug)
"#;

/// Convert a Markdown document to JSX and splice it into a React component.
#[derive(Parser, Debug)]
#[command(
    name = "md2tsx",
    version,
    about = "Convert a Markdown document to JSX and splice it into a React component",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown document to convert.
    markdown_file: PathBuf,

    /// Component name; the markup goes into src/contents/<TARGET_NAME>.tsx.
    target_name: String,

    /// Directory the component path and images folder are resolved against.
    #[arg(long, env = "MD2TSX_PROJECT_ROOT")]
    project_root: Option<PathBuf>,

    /// Component directory, relative to the project root.
    #[arg(long, env = "MD2TSX_CONTENTS_DIR", default_value = "src/contents")]
    contents_dir: PathBuf,

    /// Component file extension.
    #[arg(long, env = "MD2TSX_TARGET_EXT", default_value = "tsx")]
    target_ext: String,

    /// className of the wrapping <div>.
    #[arg(long, env = "MD2TSX_CONTAINER_CLASS", default_value = "Content")]
    container_class: String,

    /// className of generated tables.
    #[arg(long, env = "MD2TSX_TABLE_CLASS", default_value = "converted-table")]
    table_class: String,

    /// className of generated images.
    #[arg(long, env = "MD2TSX_IMAGE_CLASS", default_value = "medium")]
    image_class: String,

    /// Suffix appended to the document stem to name its images folder.
    #[arg(long, env = "MD2TSX_IMAGES_SUFFIX", default_value = "_images")]
    images_suffix: String,

    /// Extension of the placeholder image names (image_01.<EXT>).
    #[arg(long, env = "MD2TSX_IMAGE_EXT", default_value = "png")]
    image_ext: String,

    /// Extension of the fallback file written beside the document.
    #[arg(long, env = "MD2TSX_FALLBACK_EXT", default_value = "txt")]
    fallback_ext: String,

    /// Do not create the <name>_images folder.
    #[arg(long, env = "MD2TSX_NO_IMAGES_DIR")]
    no_images_dir: bool,

    /// Print the markup to stdout; write nothing.
    #[arg(long)]
    dry_run: bool,

    /// Print a JSON report on stdout instead of human-readable lines.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2TSX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2TSX_QUIET")]
    quiet: bool,
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            eprintln!("{EXAMPLE}");
            std::process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    let cli = parse_cli();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || cli.json {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    if cli.dry_run {
        dry_run(&cli, &config)?;
    } else {
        convert_and_splice(&cli, &config)?;
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "{}",
            dim(&format!(
                "Images are not copied: place them in {} and fill in each <img src> by hand.",
                config.images_folder_name(&cli.markdown_file)
            ))
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .contents_dir(&cli.contents_dir)
        .target_extension(&cli.target_ext)
        .container_class(&cli.container_class)
        .table_class(&cli.table_class)
        .image_class(&cli.image_class)
        .images_suffix(&cli.images_suffix)
        .image_extension(&cli.image_ext)
        .fallback_extension(&cli.fallback_ext)
        .create_images_dir(!cli.no_images_dir && !cli.dry_run);

    if let Some(ref root) = cli.project_root {
        builder = builder.project_root(root);
    }

    builder.build().context("Invalid configuration")
}

/// `--dry-run`: print markup (or the JSON conversion output) and stop.
fn dry_run(cli: &Cli, config: &ConversionConfig) -> Result<()> {
    let output = match convert(&cli.markdown_file, config) {
        Ok(output) => output,
        Err(e) => {
            report_failure(&e);
            return Ok(());
        }
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        writeln!(handle, "{}", output.markup).context("Failed to write to stdout")?;
    }
    Ok(())
}

/// Full pipeline: convert, splice, fall back.
fn convert_and_splice(cli: &Cli, config: &ConversionConfig) -> Result<()> {
    let report = match run(&cli.markdown_file, &cli.target_name, config) {
        Ok(report) => report,
        Err(e) => {
            report_failure(&e);
            return Ok(());
        }
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialise report")?;
        println!("{json}");
        return Ok(());
    }

    if cli.quiet {
        return Ok(());
    }

    match &report.outcome {
        RunOutcome::Spliced { target } => {
            eprintln!(
                "{} Successfully converted {} and inserted into {}",
                green("✔"),
                cli.markdown_file.display(),
                bold(&target.display().to_string())
            );
        }
        RunOutcome::FallbackWritten { path, .. } => {
            eprintln!(
                "{} Fallback: Saved converted content to {}",
                yellow("⚠"),
                bold(&path.display().to_string())
            );
        }
    }

    let stats = &report.stats;
    eprintln!(
        "   {} lines  →  {} markup lines  ({} tables, {} headings, {} images)",
        dim(&stats.source_lines.to_string()),
        dim(&stats.markup_lines.to_string()),
        stats.tables,
        stats.headings,
        stats.images_referenced,
    );
    Ok(())
}

fn report_failure(e: &Md2TsxError) {
    match e {
        Md2TsxError::FallbackWriteFailed { .. } => eprintln!("{} {}", red("✘"), e),
        _ => {
            eprintln!("{} Error: {}", red("✘"), e);
            eprintln!("{} Conversion failed", red("✘"));
        }
    }
}
