//! # sheetframe-core
//!
//! Core data structures for the sheetframe workbook loader.
//!
//! This crate provides the types shared by every other sheetframe crate:
//! - [`Table`] and [`Column`] - The in-memory result of loading a worksheet
//! - [`FieldValue`] and [`ColumnKind`] - Typed views over raw text fields
//! - [`ExcelReader`] - The capability the loader delegates workbook parsing to
//! - [`MemoryReader`] - An in-memory reader serving canned sheet text
//!
//! ## Example
//!
//! ```rust
//! use sheetframe_core::{ColumnKind, FieldValue, Table};
//!
//! let rows = vec![
//!     vec!["1".to_string(), "north".to_string()],
//!     vec!["2".to_string(), "south".to_string()],
//! ];
//! let table = Table::from_rows(rows, 1).unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.columns()[0].kind, ColumnKind::Integer);
//! assert_eq!(table.value(1, 0), Some(FieldValue::Integer(2)));
//! assert_eq!(table.get(1, 1), Some("south"));
//! ```

pub mod error;
pub mod reader;
pub mod split;
pub mod table;
pub mod value;

pub use error::{Error, Result};
pub use reader::{ExcelReader, FetchMode, MemoryReader, OpenStatus};
pub use table::{Column, Table};
pub use value::{ColumnKind, FieldValue};

/// Default number of rows inspected when inferring column count and kinds
pub const DEFAULT_GUESS_ROWS: usize = 1;
