//! # md2tsx
//!
//! Convert a Markdown document to JSX and splice it into a React component.
//!
//! ## Pipeline Overview
//!
//! ```text
//! notes.md
//!  │
//!  ├─ 1. Input      read the document (once)
//!  ├─ 2. Images     catalog ![alt](path) → notes_images/image_NN.png
//!  ├─ 3. Transform  one JSX element per line, tables kept together
//!  ├─ 4. Splice     insert into src/contents/<target>.tsx at `return ( … )`
//!  └─ 5. Fallback   on splice failure, save markup to notes.txt
//! ```
//!
//! Image files are never copied. Generated `<img>` tags carry an empty
//! `src` and a comment naming where the file is expected; wiring them up is
//! left to the author.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2tsx::{run, ConversionConfig, RunOutcome};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let report = run("success.md", "engineering", &config)?;
//!     if let RunOutcome::FallbackWritten { path, reason } = &report.outcome {
//!         eprintln!("splice failed ({reason}); markup saved to {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2tsx` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, run, write_fallback};
pub use error::Md2TsxError;
pub use output::{ConversionOutput, ConversionStats, RunOutcome, RunReport};
pub use pipeline::images::{catalog_images, scan_images, ImageMap, ImageReference};
pub use pipeline::splice::{splice_into_target, splice_markup};
pub use pipeline::transform::{convert_str, transform_document};
