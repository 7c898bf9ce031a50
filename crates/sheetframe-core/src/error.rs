//! Error types for sheetframe-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetframe-core
#[derive(Debug, Error)]
pub enum Error {
    /// A row holds more fields than the table has columns
    #[error("Row {row} has {found} fields, expected at most {expected}")]
    RowTooWide {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (count: {1})")]
    ColumnOutOfBounds(usize, usize),

    /// Header length does not match the column count
    #[error("Header has {found} names, table has {expected} columns")]
    HeaderMismatch { found: usize, expected: usize },

    /// Invalid split pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
