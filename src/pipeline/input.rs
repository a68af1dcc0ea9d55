//! Input resolution: validate the Markdown document and read it into memory.
//!
//! The document is read exactly once per run; both the image scanner and the
//! line transformer work on the returned text.

use crate::error::Md2TsxError;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A Markdown document loaded from disk.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Path as supplied by the caller.
    pub path: PathBuf,
    /// Full UTF-8 contents.
    pub text: String,
}

/// Read the document at `path`, mapping I/O failures to [`Md2TsxError`].
pub fn read_source(path: impl AsRef<Path>) -> Result<SourceDocument, Md2TsxError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(Md2TsxError::SourceNotFound { path });
    }

    let mut file = match std::fs::File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Md2TsxError::PermissionDenied { path });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Md2TsxError::SourceNotFound { path });
        }
        Err(source) => return Err(Md2TsxError::SourceReadFailed { path, source }),
    };

    let mut text = String::new();
    if let Err(source) = file.read_to_string(&mut text) {
        return Err(Md2TsxError::SourceReadFailed { path, source });
    }

    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(SourceDocument { path, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_existing_document() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "# Hello\n\nWorld").unwrap();
        let doc = read_source(tmp.path()).unwrap();
        assert_eq!(doc.text, "# Hello\n\nWorld");
        assert_eq!(doc.path, tmp.path());
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(dir.path().join("absent.md")).unwrap_err();
        assert!(matches!(err, Md2TsxError::SourceNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0x23, 0x20, 0xff, 0xfe]).unwrap();
        let err = read_source(tmp.path()).unwrap_err();
        assert!(matches!(err, Md2TsxError::SourceReadFailed { .. }));
    }
}
