//! Result types returned by the conversion entry points.

use crate::pipeline::images::ImageMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The converted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Wrapped JSX markup, lines joined with `\n`.
    pub markup: String,
    /// Image catalog used to annotate the placeholders.
    pub images: ImageMap,
    /// Name of the folder where the real image files belong.
    pub images_folder: String,
    pub stats: ConversionStats,
}

/// Counters and timing for one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    pub source_lines: usize,
    pub markup_lines: usize,
    pub tables: usize,
    pub headings: usize,
    pub images_referenced: usize,
    /// Placeholders whose path was missing from the catalog.
    pub images_unmapped: usize,
    pub duration_ms: u64,
}

/// Where the markup ended up after [`crate::convert::run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Markup was inserted into the target component.
    Spliced { target: PathBuf },
    /// Splicing failed; the markup was saved beside the source instead.
    FallbackWritten {
        path: PathBuf,
        /// Why the splice failed.
        reason: String,
    },
}

impl RunOutcome {
    pub fn is_spliced(&self) -> bool {
        matches!(self, RunOutcome::Spliced { .. })
    }

    /// File that now holds the markup.
    pub fn written_path(&self) -> &PathBuf {
        match self {
            RunOutcome::Spliced { target } => target,
            RunOutcome::FallbackWritten { path, .. } => path,
        }
    }
}

/// Serialisable summary of a full run, as printed by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub source: PathBuf,
    pub target_name: String,
    pub outcome: RunOutcome,
    pub images_folder: String,
    pub stats: ConversionStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serialises_with_tag() {
        let outcome = RunOutcome::FallbackWritten {
            path: PathBuf::from("notes.txt"),
            reason: "no anchor".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "fallback_written");
        assert_eq!(json["reason"], "no anchor");
        assert!(!outcome.is_spliced());
        assert_eq!(outcome.written_path(), &PathBuf::from("notes.txt"));
    }
}
