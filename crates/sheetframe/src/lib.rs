//! # sheetframe
//!
//! Load worksheets from Excel workbooks into in-memory tables.
//!
//! sheetframe does not read workbook files itself. It drives an
//! [`ExcelReader`] - by default the native `excel_to_df` library - that
//! renders a sheet as semicolon-delimited text, and turns that text into a
//! [`Table`].
//!
//! ## Features
//!
//! - One workbook session per [`WorkbookTableLoader`], no global state
//! - Single- or multi-threaded sheet extraction ([`FetchMode`])
//! - Column count and kind inference from the leading rows
//! - Splitting sheets that stack several tables ([`Table::split`])
//! - Writing tables back out as delimited text ([`DelimitedWriter`])
//!
//! ## Example
//!
//! ```rust
//! use sheetframe::prelude::*;
//!
//! let reader = MemoryReader::new("demo").with_sheet("Data", "a;b\n1;2\n3;4");
//! let mut loader = WorkbookTableLoader::new(reader);
//!
//! loader.open("book.xlsx").unwrap();
//! let table = loader.load_sheet("Data").unwrap();
//! loader.close();
//!
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.get(1, 0), Some("1"));
//!
//! let text = DelimitedWriter::to_string(&table, &WriteOptions::default()).unwrap();
//! assert_eq!(text, "a;b\n1;2\n3;4\n");
//! ```
//!
//! With the native library:
//!
//! ```rust,no_run
//! use sheetframe::prelude::*;
//! use sheetframe::NativeReaderConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut loader = WorkbookTableLoader::native(NativeReaderConfig::default())?;
//!     println!("{}", loader.version());
//!
//!     let table = loader.read_sheet("infomercado.xlsx", "003 Consumo")?;
//!     DelimitedWriter::write_file(&table, "consumo.csv", &WriteOptions::default())?;
//!     Ok(())
//! }
//! ```

mod error;
mod loader;
pub mod prelude;
mod shared;

pub use error::{LoadError, Result};
pub use loader::WorkbookTableLoader;
pub use shared::SharedLoader;

// Re-export core types
pub use sheetframe_core::{
    Column, ColumnKind, ExcelReader, FetchMode, FieldValue, MemoryReader, OpenStatus, Table,
    DEFAULT_GUESS_ROWS,
};

// Re-export delimited text types
pub use sheetframe_csv::{
    CsvError, CsvResult, DelimitedReader, DelimitedWriter, HeaderMode, LineTerminator,
    ReadOptions, WriteOptions,
};

// Re-export the native binding
#[cfg(feature = "native")]
pub use sheetframe_native::{NativeError, NativeReader, NativeReaderConfig};
