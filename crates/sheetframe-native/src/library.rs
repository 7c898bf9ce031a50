//! Runtime loading of the native library and the `ExcelReader` implementation.

use std::ffi::{CStr, CString, OsString};
use std::os::raw::{c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::Library;
use sheetframe_core::{ExcelReader, FetchMode};

use crate::error::{NativeError, Result};

type VersionFn = unsafe extern "C" fn() -> *const c_char;
type OpenFn = unsafe extern "C" fn(*const c_char) -> c_int;
type CloseFn = unsafe extern "C" fn() -> c_int;
type SheetFn = unsafe extern "C" fn(*const c_char) -> *const c_char;

/// Base names the library ships under. The C# build is `excel_to_df_cs`.
const LIBRARY_NAMES: &[&str] = &["excel_to_df", "excel_to_df_cs"];

/// Status reported for a path that cannot be passed to C (interior NUL).
const STATUS_BAD_PATH: i32 = -1;

/// Configuration for loading the native library.
#[derive(Debug, Clone, Default)]
pub struct NativeReaderConfig {
    /// Path to the library file.
    /// If None, [`find_library`] searches next to the executable and in the
    /// working directory.
    pub library_path: Option<PathBuf>,
}

/// [`ExcelReader`] backed by the native `excel_to_df` library.
pub struct NativeReader {
    path: PathBuf,
    version: VersionFn,
    open: OpenFn,
    close: CloseFn,
    get_sheet: Option<SheetFn>,
    get_sheet_mt: Option<SheetFn>,
    // Keeps the function pointers above valid; must not be dropped first.
    _library: Library,
}

impl NativeReader {
    /// Load the library and resolve its exports.
    pub fn load(config: NativeReaderConfig) -> Result<Self> {
        let path = match config.library_path {
            Some(path) => path,
            None => find_library().ok_or(NativeError::LibraryNotFound)?,
        };

        tracing::debug!("Loading native reader from {}", path.display());

        // SAFETY: loading runs the library's initialisers; the library is
        // trusted to be an excel_to_df build.
        let library = unsafe { Library::new(&path) }.map_err(|source| NativeError::Load {
            path: path.display().to_string(),
            source,
        })?;

        // SAFETY: the signatures match the library's exported C API.
        let (version, open, close, get_sheet, get_sheet_mt) = unsafe {
            (
                required::<VersionFn>(&library, "version")?,
                required::<OpenFn>(&library, "openExcel")?,
                required::<CloseFn>(&library, "closeExcel")?,
                optional::<SheetFn>(&library, "getSheet"),
                optional::<SheetFn>(&library, "getSheetMT"),
            )
        };

        if get_sheet.is_none() && get_sheet_mt.is_none() {
            return Err(NativeError::NoSheetFunction);
        }

        tracing::info!("Loaded native reader {}", path.display());

        Ok(Self {
            path,
            version,
            open,
            close,
            get_sheet,
            get_sheet_mt,
            _library: library,
        })
    }

    /// Path the library was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the library exports a routine for this mode (no fallback needed).
    pub fn supports(&self, mode: FetchMode) -> bool {
        match mode {
            FetchMode::SingleThread => self.get_sheet.is_some(),
            FetchMode::MultiThread => self.get_sheet_mt.is_some(),
        }
    }

    fn sheet_fn(&self, mode: FetchMode) -> Option<SheetFn> {
        match mode {
            FetchMode::SingleThread => self.get_sheet.or(self.get_sheet_mt),
            FetchMode::MultiThread => self.get_sheet_mt.or(self.get_sheet),
        }
    }
}

impl ExcelReader for NativeReader {
    fn version(&self) -> String {
        // SAFETY: returns a pointer to a static string or null.
        unsafe { copy_string((self.version)()) }.unwrap_or_default()
    }

    fn open_excel(&mut self, path: &Path) -> i32 {
        let Ok(c_path) = CString::new(path.to_string_lossy().into_owned()) else {
            tracing::warn!("Workbook path contains a NUL byte: {}", path.display());
            return STATUS_BAD_PATH;
        };

        // SAFETY: c_path outlives the call.
        unsafe { (self.open)(c_path.as_ptr()) }
    }

    fn close_excel(&mut self) -> i32 {
        // SAFETY: closing with nothing open is a no-op in the library.
        unsafe { (self.close)() }
    }

    fn get_sheet(&mut self, name: &str, mode: FetchMode) -> Option<String> {
        let c_name = CString::new(name).ok()?;
        let fetch = self.sheet_fn(mode)?;

        if !self.supports(mode) {
            tracing::debug!("{mode:?} sheet routine not exported, using the other one");
        }

        // SAFETY: c_name outlives the call; the returned buffer belongs to
        // the library and is copied before the next call can reuse it.
        unsafe { copy_string(fetch(c_name.as_ptr())) }
    }
}

/// Copy a library-owned C string. Null means "no value".
unsafe fn copy_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
}

unsafe fn required<T: Copy>(library: &Library, name: &'static str) -> Result<T> {
    library
        .get::<T>(name.as_bytes())
        .map(|symbol| *symbol)
        .map_err(|source| NativeError::MissingSymbol { name, source })
}

unsafe fn optional<T: Copy>(library: &Library, name: &'static str) -> Option<T> {
    library.get::<T>(name.as_bytes()).ok().map(|symbol| *symbol)
}

/// Platform file names the library may have, in search order.
///
/// `excel_to_df.dll` on Windows, `libexcel_to_df.so` on Linux, and so on.
pub fn library_file_names() -> Vec<OsString> {
    LIBRARY_NAMES
        .iter()
        .map(libloading::library_filename)
        .collect()
}

/// Look for the library in each directory, in order.
pub fn search_library<P: AsRef<Path>>(dirs: &[P]) -> Option<PathBuf> {
    let names = library_file_names();

    dirs.iter()
        .flat_map(|dir| names.iter().map(move |name| dir.as_ref().join(name)))
        .find(|candidate| candidate.is_file())
}

/// Attempt to locate the library next to the current executable or in the
/// working directory.
pub fn find_library() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        dirs.push(exe);
    }

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }

    search_library(&dirs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_file_names_are_platform_specific() {
        let names = library_file_names();
        assert_eq!(names.len(), 2);

        let first = names[0].to_string_lossy().into_owned();
        assert!(first.contains("excel_to_df"));
        if cfg!(windows) {
            assert_eq!(first, "excel_to_df.dll");
        } else if cfg!(target_os = "macos") {
            assert_eq!(first, "libexcel_to_df.dylib");
        } else {
            assert_eq!(first, "libexcel_to_df.so");
        }
    }

    #[test]
    fn test_search_library_prefers_earlier_dirs() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let name = &library_file_names()[1];

        std::fs::write(second.path().join(name), b"").unwrap();
        assert_eq!(
            search_library(&[first.path(), second.path()]),
            Some(second.path().join(name))
        );

        std::fs::write(first.path().join(name), b"").unwrap();
        assert_eq!(
            search_library(&[first.path(), second.path()]),
            Some(first.path().join(name))
        );
    }

    #[test]
    fn test_search_library_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(search_library(&[dir.path()]), None);
    }

    #[test]
    fn test_load_rejects_non_library_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&library_file_names()[0]);
        std::fs::write(&path, b"not a shared object").unwrap();

        let result = NativeReader::load(NativeReaderConfig {
            library_path: Some(path),
        });
        assert!(matches!(result, Err(NativeError::Load { .. })));
    }

    #[test]
    fn test_copy_string_null() {
        assert_eq!(unsafe { copy_string(std::ptr::null()) }, None);

        let owned = CString::new("v0.2.56").unwrap();
        assert_eq!(
            unsafe { copy_string(owned.as_ptr()) }.as_deref(),
            Some("v0.2.56")
        );
    }
}
