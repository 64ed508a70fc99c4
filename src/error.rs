//! Error types for TCU to CSV conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the converter.
///
/// Only conditions that stop a run live here. Malformed records and read
/// failures in the middle of the stream are logged and counted instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Cannot open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output file {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ConvertError {
    /// Whether the error happened before any record could be processed.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            ConvertError::FileNotFound { .. }
                | ConvertError::OpenInput { .. }
                | ConvertError::CreateOutput { .. }
        )
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors() {
        let err = ConvertError::FileNotFound {
            path: PathBuf::from("missing.tcu"),
        };
        assert!(err.is_startup());
        assert_eq!(err.to_string(), "File not found: missing.tcu");

        let err = ConvertError::Io(std::io::Error::other("disk full"));
        assert!(!err.is_startup());
    }
}
