//! Error type for the per-file conversion pipeline.
//!
//! Every failure is scoped to one source file; a batch driver logs the
//! error and moves on. Nothing in this workspace panics on malformed input.

use thiserror::Error;

use tabcast_ingest::IngestError;
use tabcast_output::OutputError;

/// A file-scoped conversion failure.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading or shaping the source failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Persisting the typed table failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ConvertError {
    /// True when the failure was the spreadsheet read timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Ingest(IngestError::ReadTimeout { .. }))
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_timeout_detection() {
        let err = ConvertError::from(IngestError::ReadTimeout {
            path: PathBuf::from("book.xlsx"),
            timeout: Duration::from_secs(60),
        });
        assert!(err.is_timeout());

        let err = ConvertError::from(IngestError::Encoding {
            path: PathBuf::from("file.csv"),
        });
        assert!(!err.is_timeout());
    }
}
