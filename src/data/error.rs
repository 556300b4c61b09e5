//! Data layer error types
//!
//! Errors that can occur while reading the indicator tables from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an indicator table
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV reader rejected the file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the table needs is absent from the header row
    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// The input file does not exist
    #[error("Input file not found: {0:?}")]
    NotFound(PathBuf),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::MissingColumn {
            column: "OBS_VALUE".to_string(),
            source_name: "GDP per capita".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing column 'OBS_VALUE' in GDP per capita"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataError = io_err.into();
        assert!(matches!(data_err, DataError::Io(_)));
    }
}
