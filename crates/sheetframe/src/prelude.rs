//! Prelude module for convenient imports
//!
//! ```rust
//! use sheetframe::prelude::*;
//! ```

pub use crate::{
    // Loader
    LoadError,
    SharedLoader,
    WorkbookTableLoader,

    // Table model
    ColumnKind,
    FieldValue,
    Table,

    // Readers
    ExcelReader,
    FetchMode,
    MemoryReader,
    OpenStatus,

    // Delimited text
    DelimitedReader,
    DelimitedWriter,
    HeaderMode,
    ReadOptions,
    WriteOptions,
};

#[cfg(feature = "native")]
pub use crate::NativeReader;
