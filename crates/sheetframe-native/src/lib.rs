//! Binding to the native `excel_to_df` workbook reader.
//!
//! The native library does the actual work of reading `.xlsx` files. It is
//! loaded at runtime and exposes a small C API:
//!
//! ```text
//! const char* version(void);
//! int         openExcel(const char* path);   // 0 = ok, -1 = not found, -2 = invalid
//! int         closeExcel(void);
//! const char* getSheet(const char* name);    // single thread
//! const char* getSheetMT(const char* name);  // multi-thread
//! ```
//!
//! Sheet text uses `;` between fields and `\n` between records. The library
//! keeps one workbook open at a time.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetframe_core::{ExcelReader, FetchMode};
//! use sheetframe_native::{NativeReader, NativeReaderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut reader = NativeReader::load(NativeReaderConfig::default())?;
//!     println!("{}", reader.version());
//!
//!     if reader.open_excel("report.xlsx".as_ref()) == 0 {
//!         let text = reader.get_sheet("003 Consumo", FetchMode::MultiThread);
//!         println!("{} bytes", text.map_or(0, |t| t.len()));
//!     }
//!     reader.close_excel();
//!     Ok(())
//! }
//! ```

mod error;
mod library;

pub use error::NativeError;
pub use library::{find_library, library_file_names, search_library, NativeReader, NativeReaderConfig};
