//! Error types for the workbook loader

use sheetframe_core::OpenStatus;
use sheetframe_csv::CsvError;
use thiserror::Error;

/// Result type alias using [`LoadError`]
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors returned by [`WorkbookTableLoader`](crate::WorkbookTableLoader)
#[derive(Debug, Error)]
pub enum LoadError {
    /// The reader refused to open the workbook
    #[error("Failed to open workbook (status {code})")]
    OpenFailed { code: i32 },

    /// The reader returned no text for the sheet
    #[error("Sheet not found or empty: {0}")]
    SheetNotFound(String),

    /// The reader returned text that is not a valid table
    #[error("Failed to parse sheet '{sheet}': {source}")]
    Parse {
        sheet: String,
        #[source]
        source: CsvError,
    },

    /// Table operation error
    #[error("Table error: {0}")]
    Table(#[from] sheetframe_core::Error),

    /// Native library error
    #[cfg(feature = "native")]
    #[error("Native reader error: {0}")]
    Native(#[from] sheetframe_native::NativeError),
}

impl LoadError {
    /// Decoded status for [`LoadError::OpenFailed`]
    pub fn open_status(&self) -> Option<OpenStatus> {
        match self {
            LoadError::OpenFailed { code } => Some(OpenStatus::from_code(*code)),
            _ => None,
        }
    }
}
