//! Delimited text error types

use thiserror::Error;

/// Result type for delimited text operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur while reading or writing delimited text
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input held no records
    #[error("No records in input")]
    Empty,

    /// Parse error
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },
}
