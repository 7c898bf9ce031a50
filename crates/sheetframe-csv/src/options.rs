//! Delimited text options

use sheetframe_core::DEFAULT_GUESS_ROWS;

/// How the first record is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// Every record is data; columns get default names
    #[default]
    None,
    /// The first record names the columns and is not part of the data
    FirstRow,
}

/// Options for reading delimited text
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Field delimiter (default: semicolon)
    pub delimiter: u8,
    /// Header handling (default: no header)
    pub header: HeaderMode,
    /// Records inspected to infer column count and kinds (default: 1)
    pub guess_rows: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            header: HeaderMode::None,
            guess_rows: DEFAULT_GUESS_ROWS,
        }
    }
}

/// Options for writing delimited text
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Field delimiter (default: semicolon)
    pub delimiter: u8,
    /// Write the column names as the first line
    pub write_header: bool,
    /// Line terminator
    pub line_terminator: LineTerminator,
    /// Decimal separator used for float columns (default: `.`)
    pub decimal_separator: char,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            write_header: false,
            line_terminator: LineTerminator::LF,
            decimal_separator: '.',
        }
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
}
