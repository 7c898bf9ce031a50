//! Delimited text writer

use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{LineTerminator, WriteOptions};
use sheetframe_core::{ColumnKind, Table};

/// Delimited text writer
pub struct DelimitedWriter;

impl DelimitedWriter {
    /// Write a table to a file
    pub fn write_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &WriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(table, file, options)
    }

    /// Write a table to a string
    pub fn to_string(table: &Table, options: &WriteOptions) -> CsvResult<String> {
        let mut buf = Vec::new();
        Self::write(table, &mut buf, options)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write a table to a writer
    ///
    /// Fields are written verbatim: nothing is quoted or escaped, and short
    /// rows stay short. A row holding a single empty field is written as a
    /// blank line, which the reader skips.
    pub fn write<W: Write>(table: &Table, writer: W, options: &WriteOptions) -> CsvResult<()> {
        let (terminator, line_end): (_, &[u8]) = match options.line_terminator {
            LineTerminator::LF => (csv::Terminator::Any(b'\n'), b"\n"),
            LineTerminator::CRLF => (csv::Terminator::CRLF, b"\r\n"),
        };

        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(terminator)
            .flexible(true);
        let mut csv_writer = builder.from_writer(writer);

        if options.write_header && table.column_count() > 0 {
            let header: Vec<&str> = table.column_names().collect();
            csv_writer = write_line(&builder, csv_writer, &header, line_end)?;
        }

        for row in table.rows() {
            let record: Vec<Cow<'_, str>> = row
                .iter()
                .enumerate()
                .map(|(col, field)| {
                    let is_float = table
                        .columns()
                        .get(col)
                        .is_some_and(|c| c.kind == ColumnKind::Float);
                    localize_decimal(field, is_float, options.decimal_separator)
                })
                .collect();
            csv_writer = write_line(&builder, csv_writer, &record, line_end)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

/// Write one record.
///
/// The csv writer emits `""` for a lone empty field even with quoting off, so
/// such a record goes straight to the underlying writer as a bare line end.
fn write_line<W: Write, T: AsRef<str>>(
    builder: &csv::WriterBuilder,
    mut csv_writer: csv::Writer<W>,
    record: &[T],
    line_end: &[u8],
) -> CsvResult<csv::Writer<W>> {
    if record.len() <= 1 && record.iter().all(|field| field.as_ref().is_empty()) {
        let mut inner = csv_writer.into_inner().map_err(|err| err.into_error())?;
        inner.write_all(line_end)?;
        return Ok(builder.from_writer(inner));
    }

    csv_writer.write_record(record.iter().map(|field| field.as_ref()))?;
    Ok(csv_writer)
}

fn localize_decimal(field: &str, is_float: bool, separator: char) -> Cow<'_, str> {
    if is_float && separator != '.' && field.contains('.') {
        Cow::Owned(field.replace('.', &separator.to_string()))
    } else {
        Cow::Borrowed(field)
    }
}
