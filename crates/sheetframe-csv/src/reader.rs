//! Delimited text reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::{HeaderMode, ReadOptions};
use sheetframe_core::Table;

/// Delimited text reader
pub struct DelimitedReader;

impl DelimitedReader {
    /// Read a delimited text file into a table
    pub fn read_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> CsvResult<Table> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read delimited text held in memory into a table
    pub fn read_str(text: &str, options: &ReadOptions) -> CsvResult<Table> {
        Self::read(text.as_bytes(), options)
    }

    /// Read delimited text from a reader into a table
    ///
    /// Quotes carry no meaning and blank lines are skipped. The first
    /// `guess_rows` records fix the column count; a later, wider record is a
    /// parse error. Input with no records at all is [`CsvError::Empty`].
    pub fn read<R: Read>(reader: R, options: &ReadOptions) -> CsvResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        let mut lines = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            lines.push(record.position().map_or(0, |p| p.line()));
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if rows.is_empty() {
            return Err(CsvError::Empty);
        }

        let (result, skipped) = match options.header {
            HeaderMode::None => (Table::from_rows(rows, options.guess_rows), 0),
            HeaderMode::FirstRow => {
                let header = rows.remove(0);
                (Table::with_header(header, rows, options.guess_rows), 1)
            }
        };

        result.map_err(|err| match err {
            sheetframe_core::Error::RowTooWide {
                row,
                found,
                expected,
            } => CsvError::Parse {
                line: lines.get(row + skipped).copied().unwrap_or(0),
                message: format!("{found} fields, expected at most {expected}"),
            },
            // Building from rows only rejects over-wide rows
            other => CsvError::Parse {
                line: 0,
                message: other.to_string(),
            },
        })
    }
}
