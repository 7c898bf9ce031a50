//! Table type - the in-memory result of loading a worksheet

use crate::error::{Error, Result};
use crate::value::{ColumnKind, FieldValue};

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (`Column0`, `Column1`, ... unless a header was applied)
    pub name: String,
    /// Kind inferred from the leading rows
    pub kind: ColumnKind,
}

/// Default name of the column at `index`
pub fn default_column_name(index: usize) -> String {
    format!("Column{index}")
}

/// An ordered sequence of rows of text fields with column metadata
///
/// Fields are stored exactly as they were read so that writing a table back
/// out with the same separator reproduces its rows. Rows may be shorter than
/// the column count; missing trailing fields read as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    has_header: bool,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            has_header: false,
        }
    }

    /// Build a table from raw rows.
    ///
    /// The first `guess_rows` rows (at least one) determine the column count
    /// and the column kinds. Any later row wider than that is rejected.
    pub fn from_rows(rows: Vec<Vec<String>>, guess_rows: usize) -> Result<Self> {
        Self::build(None, rows, guess_rows)
    }

    /// Build a table from a header row and raw data rows.
    ///
    /// The header takes part in sizing the table; columns beyond the header's
    /// length keep their default names.
    pub fn with_header(
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        guess_rows: usize,
    ) -> Result<Self> {
        Self::build(Some(header), rows, guess_rows)
    }

    fn build(
        header: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
        guess_rows: usize,
    ) -> Result<Self> {
        let lookahead = &rows[..rows.len().min(guess_rows.max(1))];

        let width = lookahead
            .iter()
            .map(Vec::len)
            .chain(header.as_ref().map(Vec::len))
            .max()
            .unwrap_or(0);

        let columns = (0..width)
            .map(|col| {
                let kind = ColumnKind::infer(
                    lookahead
                        .iter()
                        .filter_map(|row| row.get(col).map(String::as_str)),
                );
                let name = header
                    .as_ref()
                    .and_then(|names| names.get(col).cloned())
                    .unwrap_or_else(|| default_column_name(col));
                Column { name, kind }
            })
            .collect();

        let mut table = Table {
            columns,
            rows: Vec::with_capacity(rows.len()),
            has_header: header.is_some(),
        };

        for row in rows {
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Append a row, rejecting rows wider than the table
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() > self.columns.len() {
            return Err(Error::RowTooWide {
                row: self.rows.len(),
                found: row.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of data rows (the header is not counted)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the column names came from a header row
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Column metadata
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// All data rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consume the table, returning its data rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Get a data row by index
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Get a raw field
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Get a field typed by its column's kind
    pub fn value(&self, row: usize, col: usize) -> Option<FieldValue> {
        let kind = self.columns.get(col)?.kind;
        self.get(row, col).map(|field| kind.parse(field))
    }

    /// Find a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub(crate) fn mark_header(&mut self) {
        self.has_header = true;
    }

    /// Rename all columns at once
    pub fn set_header(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.columns.len() {
            return Err(Error::HeaderMismatch {
                found: names.len(),
                expected: self.columns.len(),
            });
        }
        for (column, name) in self.columns.iter_mut().zip(names) {
            column.name = name;
        }
        self.has_header = true;
        Ok(())
    }
}
