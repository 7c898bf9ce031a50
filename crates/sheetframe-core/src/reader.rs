//! The workbook reading capability
//!
//! sheetframe does not parse workbooks itself. Opening a file and rendering a
//! worksheet as delimited text is delegated to an [`ExcelReader`], normally
//! the native `excel_to_df` library (see `sheetframe-native`).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which sheet extraction routine the reader should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FetchMode {
    /// Extract the sheet on the calling thread (`getSheet`)
    SingleThread,
    /// Let the reader spread extraction over worker threads (`getSheetMT`)
    #[default]
    MultiThread,
}

/// Interpretation of the status code returned when opening a workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    /// Workbook opened
    Opened,
    /// No file at the given path (`-1`)
    FileNotFound,
    /// File exists but is not a readable workbook (`-2`)
    InvalidWorkbook,
    /// Any other non-zero code
    Unknown(i32),
}

impl OpenStatus {
    /// Decode a raw status code
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => OpenStatus::Opened,
            -1 => OpenStatus::FileNotFound,
            -2 => OpenStatus::InvalidWorkbook,
            other => OpenStatus::Unknown(other),
        }
    }

    /// The raw status code
    pub fn code(self) -> i32 {
        match self {
            OpenStatus::Opened => 0,
            OpenStatus::FileNotFound => -1,
            OpenStatus::InvalidWorkbook => -2,
            OpenStatus::Unknown(code) => code,
        }
    }

    /// Check if the status reports success
    pub fn is_success(self) -> bool {
        matches!(self, OpenStatus::Opened)
    }
}

impl fmt::Display for OpenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenStatus::Opened => f.write_str("opened"),
            OpenStatus::FileNotFound => f.write_str("file not found"),
            OpenStatus::InvalidWorkbook => f.write_str("invalid workbook"),
            OpenStatus::Unknown(code) => write!(f, "unknown status {code}"),
        }
    }
}

/// Capability to open a workbook and render its sheets as delimited text.
///
/// Implementations hold at most one open workbook. The loader relies on the
/// following contract:
/// - `close_excel` must be safe to call when nothing is open.
/// - `get_sheet` returns `None` (or empty text) when the sheet does not exist.
/// - Sheet text uses `;` between fields and a newline between records.
pub trait ExcelReader {
    /// Identification string of the reader
    fn version(&self) -> String;

    /// Open a workbook. Returns `0` on success, a non-zero code otherwise.
    fn open_excel(&mut self, path: &Path) -> i32;

    /// Close the open workbook. The return value carries no meaning.
    fn close_excel(&mut self) -> i32;

    /// Render a sheet of the open workbook as delimited text
    fn get_sheet(&mut self, name: &str, mode: FetchMode) -> Option<String>;
}

impl<R: ExcelReader + ?Sized> ExcelReader for Box<R> {
    fn version(&self) -> String {
        (**self).version()
    }

    fn open_excel(&mut self, path: &Path) -> i32 {
        (**self).open_excel(path)
    }

    fn close_excel(&mut self) -> i32 {
        (**self).close_excel()
    }

    fn get_sheet(&mut self, name: &str, mode: FetchMode) -> Option<String> {
        (**self).get_sheet(name, mode)
    }
}

/// An [`ExcelReader`] serving canned sheet text from memory.
///
/// Every call is counted so callers can check how the reader was driven.
/// Sheets are only served while a workbook is open.
#[derive(Debug, Clone)]
pub struct MemoryReader {
    version: String,
    sheets: HashMap<String, String>,
    open_status: i32,
    open_path: Option<PathBuf>,
    open_calls: usize,
    close_calls: usize,
    fetches: Vec<(String, FetchMode)>,
}

impl MemoryReader {
    /// Create a reader with no sheets
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            sheets: HashMap::new(),
            open_status: 0,
            open_path: None,
            open_calls: 0,
            close_calls: 0,
            fetches: Vec::new(),
        }
    }

    /// Add a sheet
    pub fn with_sheet(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sheets.insert(name.into(), text.into());
        self
    }

    /// Status code every `open_excel` call returns
    pub fn with_open_status(mut self, code: i32) -> Self {
        self.open_status = code;
        self
    }

    /// Number of `open_excel` calls so far
    pub fn open_calls(&self) -> usize {
        self.open_calls
    }

    /// Number of `close_excel` calls so far
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    /// Sheet requests so far, in order
    pub fn fetches(&self) -> &[(String, FetchMode)] {
        &self.fetches
    }

    /// Path of the currently open workbook
    pub fn open_path(&self) -> Option<&Path> {
        self.open_path.as_deref()
    }
}

impl Default for MemoryReader {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl ExcelReader for MemoryReader {
    fn version(&self) -> String {
        self.version.clone()
    }

    fn open_excel(&mut self, path: &Path) -> i32 {
        self.open_calls += 1;
        if self.open_status == 0 {
            self.open_path = Some(path.to_path_buf());
        }
        self.open_status
    }

    fn close_excel(&mut self) -> i32 {
        self.close_calls += 1;
        self.open_path = None;
        0
    }

    fn get_sheet(&mut self, name: &str, mode: FetchMode) -> Option<String> {
        self.fetches.push((name.to_string(), mode));
        self.open_path.as_ref()?;
        self.sheets.get(name).cloned()
    }
}
