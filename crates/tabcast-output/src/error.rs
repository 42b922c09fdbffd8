//! Error types for columnar persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or reading typed tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Filesystem failure around the output location.
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to rename the finished temporary file into place.
    #[error("failed to persist output to {path}: {message}")]
    Persist { path: PathBuf, message: String },

    /// Failed DataFrame or Parquet operation.
    #[error("columnar operation failed: {message}")]
    DataFrame { message: String },

    /// A datetime cell did not conform to the canonical ISO form.
    #[error("invalid datetime value '{value}' in column '{column}'")]
    InvalidDateTime { column: String, value: String },

    /// Read-back hit a column type this engine never produces.
    #[error("unsupported column type {dtype} for column '{column}' in {path}")]
    UnsupportedColumnType {
        path: PathBuf,
        column: String,
        dtype: String,
    },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OutputError::InvalidDateTime {
            column: "when".to_string(),
            value: "garbage".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid datetime value 'garbage' in column 'when'"
        );
    }

    #[test]
    fn test_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("x".into());
        let err: OutputError = polars_err.into();
        assert!(matches!(err, OutputError::DataFrame { .. }));
    }
}
