//! Workbook session - opens a workbook through a reader and loads its sheets

use std::path::{Path, PathBuf};

use sheetframe_core::{ExcelReader, FetchMode, Table};
use sheetframe_csv::{CsvError, DelimitedReader, ReadOptions};

use crate::error::{LoadError, Result};

/// Whether a workbook is open
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Closed,
    Open { path: PathBuf },
}

/// Loads worksheets of one workbook at a time into [`Table`]s.
///
/// Parsing the workbook is delegated to an [`ExcelReader`]. The loader owns
/// the open/closed state of that reader: a second `open` while a workbook is
/// open does nothing, `close` always reaches the reader, and dropping an
/// open loader closes its workbook.
pub struct WorkbookTableLoader<R: ExcelReader> {
    reader: R,
    state: SessionState,
    read_options: ReadOptions,
    fetch_mode: FetchMode,
}

impl<R: ExcelReader> WorkbookTableLoader<R> {
    /// Create a closed loader over a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: SessionState::Closed,
            read_options: ReadOptions::default(),
            fetch_mode: FetchMode::default(),
        }
    }

    /// Options used by [`load_sheet`](Self::load_sheet)
    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// Extraction routine used by [`load_sheet`](Self::load_sheet)
    pub fn with_fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Check if a workbook is open
    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open { .. })
    }

    /// Path of the open workbook
    pub fn open_path(&self) -> Option<&Path> {
        match &self.state {
            SessionState::Open { path } => Some(path),
            SessionState::Closed => None,
        }
    }

    /// Get the underlying reader
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Get the underlying reader mutably
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Identification string of the reader, unmodified
    pub fn version(&self) -> String {
        self.reader.version()
    }

    /// Open a workbook.
    ///
    /// Does nothing if a workbook is already open. A non-zero status from the
    /// reader leaves the loader closed and is returned as
    /// [`LoadError::OpenFailed`].
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        if self.is_open() {
            tracing::debug!("Workbook already open, ignoring open request");
            return Ok(());
        }

        let path = path.as_ref();
        let code = self.reader.open_excel(path);

        if code != 0 {
            tracing::warn!("Opening '{}' failed with status {code}", path.display());
            return Err(LoadError::OpenFailed { code });
        }

        tracing::info!("Opened workbook '{}'", path.display());
        self.state = SessionState::Open {
            path: path.to_path_buf(),
        };
        Ok(())
    }

    /// Close the workbook.
    ///
    /// The reader is always asked to close, whether or not anything was
    /// opened through this loader.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
        let code = self.reader.close_excel();
        tracing::debug!("Closed workbook (status {code})");
    }

    /// Load a sheet as a table using the loader's fetch mode and read options
    pub fn load_sheet(&mut self, name: &str) -> Result<Table> {
        let options = self.read_options.clone();
        self.load_sheet_with(name, self.fetch_mode, &options)
    }

    /// Load a sheet as a table.
    ///
    /// Missing, empty and whitespace-only sheet text is reported as
    /// [`LoadError::SheetNotFound`]: the reader has no separate signal for an
    /// unknown sheet name. This includes a sheet whose only content is a
    /// cell holding spaces.
    pub fn load_sheet_with(
        &mut self,
        name: &str,
        mode: FetchMode,
        options: &ReadOptions,
    ) -> Result<Table> {
        if !self.is_open() {
            tracing::warn!("Loading sheet '{name}' with no workbook open");
        }

        let text = match self.reader.get_sheet(name, mode) {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(LoadError::SheetNotFound(name.to_string())),
        };

        tracing::debug!("Sheet '{name}': {} bytes of text ({mode:?})", text.len());

        let table = DelimitedReader::read_str(&text, options).map_err(|source| match source {
            CsvError::Empty => LoadError::SheetNotFound(name.to_string()),
            source => LoadError::Parse {
                sheet: name.to_string(),
                source,
            },
        })?;

        tracing::info!(
            "Loaded sheet '{name}': {} rows x {} columns",
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Open a workbook, load one sheet and close the workbook again.
    ///
    /// The workbook is closed even when loading fails. If the loader already
    /// had a workbook open, that one is used and closed afterwards.
    pub fn read_sheet<P: AsRef<Path>>(&mut self, path: P, name: &str) -> Result<Table> {
        self.open(path)?;
        let result = self.load_sheet(name);
        self.close();
        result
    }
}

#[cfg(feature = "native")]
impl WorkbookTableLoader<sheetframe_native::NativeReader> {
    /// Create a loader over the native library
    pub fn native(config: sheetframe_native::NativeReaderConfig) -> Result<Self> {
        Ok(Self::new(sheetframe_native::NativeReader::load(config)?))
    }
}

impl<R: ExcelReader> Drop for WorkbookTableLoader<R> {
    fn drop(&mut self) {
        if self.is_open() {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetframe_core::MemoryReader;

    #[test]
    fn test_initial_state() {
        let loader = WorkbookTableLoader::new(MemoryReader::default());
        assert!(!loader.is_open());
        assert_eq!(loader.open_path(), None);
    }

    #[test]
    fn test_open_records_path() {
        let mut loader = WorkbookTableLoader::new(MemoryReader::default());
        loader.open("book.xlsx").unwrap();
        assert!(loader.is_open());
        assert_eq!(loader.open_path(), Some(Path::new("book.xlsx")));

        loader.close();
        assert!(!loader.is_open());
        assert_eq!(loader.open_path(), None);
    }

    #[test]
    fn test_whitespace_text_is_not_found() {
        let reader = MemoryReader::default()
            .with_sheet("Blank", " \n \n")
            .with_sheet("Spaces", " ");
        let mut loader = WorkbookTableLoader::new(reader);
        loader.open("book.xlsx").unwrap();

        assert!(matches!(
            loader.load_sheet("Blank"),
            Err(LoadError::SheetNotFound(name)) if name == "Blank"
        ));
        assert!(matches!(
            loader.load_sheet("Spaces"),
            Err(LoadError::SheetNotFound(name)) if name == "Spaces"
        ));
    }

    #[test]
    fn test_fetch_mode_reaches_reader() {
        let reader = MemoryReader::default().with_sheet("S", "1");
        let mut loader =
            WorkbookTableLoader::new(reader).with_fetch_mode(FetchMode::SingleThread);
        loader.open("book.xlsx").unwrap();
        loader.load_sheet("S").unwrap();

        assert_eq!(
            loader.reader().fetches(),
            &[("S".to_string(), FetchMode::SingleThread)]
        );
    }
}
