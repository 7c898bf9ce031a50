//! # sheetframe-csv
//!
//! Reader and writer for the delimited text that workbook readers produce.
//!
//! The format is deliberately plain: one record per line, fields separated
//! by `;` (configurable), and no quoting or escaping of any kind.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{HeaderMode, LineTerminator, ReadOptions, WriteOptions};
pub use reader::DelimitedReader;
pub use writer::DelimitedWriter;
