//! Error types for source ingestion.
//!
//! Every failure is scoped to one file and carries the source path so a
//! batch driver can log and continue. The upstream-error-envelope case is
//! deliberately *not* here: it is a value
//! ([`NormalizedPayload::ErrorEnvelope`](crate::NormalizedPayload)), not an
//! error.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while reading a source file into a raw table.
#[derive(Debug, Error)]
pub enum IngestError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file bytes.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No character encoding could be determined with reasonable confidence.
    #[error("could not determine a text encoding for {path}")]
    Encoding { path: PathBuf },

    /// Delimited file has no header row.
    #[error("delimited file is empty: {path}")]
    EmptyDelimited { path: PathBuf },

    /// Failed to parse delimited text.
    #[error("failed to parse delimited text in {path}: {source}")]
    DelimitedParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// JSON parse failure or unrecognized payload shape.
    #[error("malformed payload in {path}: {reason}")]
    MalformedPayload { path: PathBuf, reason: String },

    /// Workbook could not be opened or a sheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    WorkbookRead { path: PathBuf, message: String },

    /// Workbook read exceeded its wall-clock bound; the read was abandoned
    /// and no output was produced.
    #[error("workbook read timed out after {timeout:?}: {path}")]
    ReadTimeout { path: PathBuf, timeout: Duration },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    /// Map an IO error on `path` to the appropriate variant.
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::Encoding {
            path: PathBuf::from("/data/input.csv"),
        };
        assert_eq!(
            err.to_string(),
            "could not determine a text encoding for /data/input.csv"
        );
    }

    #[test]
    fn test_from_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = IngestError::from_io(std::path::Path::new("/x"), io);
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }
}
