//! Error types for the md2tsx library.
//!
//! [`Md2TsxError`] covers every failure that stops a stage from producing its
//! result: the source document cannot be read, the target component is
//! missing or has no insertion point, or a write fails.
//!
//! Not every failure is an error at the pipeline level. The image scanner
//! degrades to an empty map when it cannot read its input, and a failed
//! splice is recovered by the fallback write; see
//! [`crate::output::RunOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2tsx library.
#[derive(Debug, Error)]
pub enum Md2TsxError {
    // ── Source errors ─────────────────────────────────────────────────────
    /// The Markdown document was not found at the given path.
    #[error("File {path} not found")]
    SourceNotFound { path: PathBuf },

    /// Process does not have read permission on the document.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The document exists but could not be read as UTF-8 text.
    #[error("Error reading file '{path}': {source}")]
    SourceReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Target errors ─────────────────────────────────────────────────────
    /// The target component file does not exist.
    #[error("{path} not found")]
    TargetNotFound { path: PathBuf },

    /// The target component has no `return ( … )` wrapper to insert into.
    #[error("Could not find return statement pattern in {path}")]
    AnchorNotFound { path: PathBuf },

    /// The target component exists but could not be read.
    #[error("Error reading TSX file '{path}': {source}")]
    TargetReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Rewriting the target component failed.
    #[error("Error updating TSX file '{path}': {source}")]
    TargetWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Fallback errors ───────────────────────────────────────────────────
    /// The recovery `.txt` file could not be written.
    #[error("Error writing fallback file '{path}': {source}")]
    FallbackWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Md2TsxError {
    /// Whether this error comes from the splice step, i.e. the markup itself
    /// is fine and can still be saved through the fallback path.
    pub fn is_splice_failure(&self) -> bool {
        matches!(
            self,
            Md2TsxError::TargetNotFound { .. }
                | Md2TsxError::AnchorNotFound { .. }
                | Md2TsxError::TargetReadFailed { .. }
                | Md2TsxError::TargetWriteFailed { .. }
        )
    }
}
