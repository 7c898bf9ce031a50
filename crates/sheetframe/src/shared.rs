//! Loader shared between threads

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use sheetframe_core::{ExcelReader, Table};

use crate::error::Result;
use crate::loader::WorkbookTableLoader;

/// A [`WorkbookTableLoader`] behind a mutex.
///
/// Readers are not reentrant, so every operation holds the lock for its whole
/// duration. Use [`SharedLoader::with`] to run several steps (open, load,
/// close) without another thread interleaving.
pub struct SharedLoader<R: ExcelReader> {
    inner: Arc<Mutex<WorkbookTableLoader<R>>>,
}

impl<R: ExcelReader> Clone for SharedLoader<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ExcelReader> SharedLoader<R> {
    /// Wrap a loader
    pub fn new(loader: WorkbookTableLoader<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(loader)),
        }
    }

    /// Run `f` with exclusive access to the loader
    pub fn with<T>(&self, f: impl FnOnce(&mut WorkbookTableLoader<R>) -> T) -> T {
        // A panic in another caller does not invalidate the open/closed state.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// See [`WorkbookTableLoader::open`]
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.with(|loader| loader.open(path))
    }

    /// See [`WorkbookTableLoader::close`]
    pub fn close(&self) {
        self.with(|loader| loader.close())
    }

    /// See [`WorkbookTableLoader::load_sheet`]
    pub fn load_sheet(&self, name: &str) -> Result<Table> {
        self.with(|loader| loader.load_sheet(name))
    }

    /// See [`WorkbookTableLoader::read_sheet`]
    pub fn read_sheet<P: AsRef<Path>>(&self, path: P, name: &str) -> Result<Table> {
        self.with(|loader| loader.read_sheet(path, name))
    }

    /// See [`WorkbookTableLoader::version`]
    pub fn version(&self) -> String {
        self.with(|loader| loader.version())
    }

    /// Check if a workbook is open
    pub fn is_open(&self) -> bool {
        self.with(|loader| loader.is_open())
    }
}
