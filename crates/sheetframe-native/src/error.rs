//! Error types for the native binding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NativeError {
    #[error("Native reader library not found. Set its path explicitly or place it next to the executable.")]
    LibraryNotFound,

    #[error("Failed to load native library '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: libloading::Error,
    },

    #[error("Native library does not export '{name}': {source}")]
    MissingSymbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("Native library exports neither 'getSheet' nor 'getSheetMT'")]
    NoSheetFunction,
}

pub type Result<T> = std::result::Result<T, NativeError>;
