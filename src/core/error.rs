//! Error types for the AROW implementation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArowError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ArowError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 2");
        assert_eq!(ArowError::EmptyDataset.to_string(), "Empty dataset");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ArowError = io.into();
        assert!(matches!(err, ArowError::IoError(_)));
    }
}
