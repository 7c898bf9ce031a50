//! Splitting a sheet that stacks several tables on top of each other
//!
//! Worksheets exported for humans often hold a series of tables separated by
//! title rows such as `Tabela 1`, `Tabela 2`. [`Table::split`] cuts such a
//! sheet at every row whose marker column matches a pattern.

use regex::Regex;

use crate::error::{Error, Result};
use crate::table::{default_column_name, Column, Table};
use crate::value::ColumnKind;

impl Table {
    /// Split the table at every row whose field in `column` matches `pattern`.
    ///
    /// Each match starts a new sub-table that runs until the next match (or
    /// the end of the table). Within a sub-table, the row `header_offset` rows
    /// below the marker supplies the column names and the rows after it are
    /// the data. Rows above the first marker are discarded. A sub-table whose
    /// header row would fall past its end is skipped.
    pub fn split(&self, pattern: &str, column: usize, header_offset: usize) -> Result<Vec<Table>> {
        if column >= self.column_count() {
            return Err(Error::ColumnOutOfBounds(column, self.column_count()));
        }

        let re = Regex::new(pattern)?;

        let markers: Vec<usize> = (0..self.row_count())
            .filter(|&row| self.get(row, column).is_some_and(|f| re.is_match(f)))
            .collect();

        let mut tables = Vec::with_capacity(markers.len());

        for (i, &start) in markers.iter().enumerate() {
            let end = markers.get(i + 1).copied().unwrap_or(self.row_count());
            let header_row = match start.checked_add(header_offset) {
                Some(row) if row < end => row,
                _ => continue,
            };

            tables.push(self.slice_with_header(header_row, end)?);
        }

        Ok(tables)
    }

    fn slice_with_header(&self, header_row: usize, end: usize) -> Result<Table> {
        let header = &self.rows()[header_row];
        let data = &self.rows()[header_row + 1..end];

        let columns = (0..self.column_count())
            .map(|col| {
                let name = header
                    .get(col)
                    .filter(|name| !name.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| default_column_name(col));
                let kind = ColumnKind::infer(
                    data.first()
                        .and_then(|row| row.get(col))
                        .map(String::as_str),
                );
                Column { name, kind }
            })
            .collect();

        let mut table = Table::new(columns);
        for row in data {
            table.push_row(row.clone())?;
        }
        table.mark_header();
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Table {
        let text: &[&[&str]] = &[
            &["Relatório", ""],
            &["Tabela 1", ""],
            &["agente", "mwh"],
            &["A", "10"],
            &["B", "20"],
            &["Tabela 2", ""],
            &["agente", "preco"],
            &["C", "1.5"],
        ];
        let rows = text
            .iter()
            .map(|r| r.iter().map(|f| f.to_string()).collect())
            .collect();
        Table::from_rows(rows, 1).unwrap()
    }

    #[test]
    fn test_split_on_marker_rows() {
        let tables = sheet().split("^Tabela ", 0, 1).unwrap();
        assert_eq!(tables.len(), 2);

        let first = &tables[0];
        assert_eq!(first.column_names().collect::<Vec<_>>(), vec!["agente", "mwh"]);
        assert_eq!(first.row_count(), 2);
        assert_eq!(first.get(1, 1), Some("20"));
        assert_eq!(first.columns()[1].kind, ColumnKind::Integer);
        assert!(first.has_header());

        let second = &tables[1];
        assert_eq!(second.column_names().collect::<Vec<_>>(), vec!["agente", "preco"]);
        assert_eq!(second.row_count(), 1);
        assert_eq!(second.columns()[1].kind, ColumnKind::Float);
    }

    #[test]
    fn test_split_offset_zero_uses_marker_as_header() {
        let tables = sheet().split("^Tabela ", 0, 0).unwrap();
        assert_eq!(tables[0].columns()[0].name, "Tabela 1");
        // Empty header cells fall back to default names
        assert_eq!(tables[0].columns()[1].name, "Column1");
        assert_eq!(tables[0].row_count(), 3);
    }

    #[test]
    fn test_split_skips_tables_without_header_row() {
        let tables = sheet().split("^Tabela ", 0, 5).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_split_huge_offset_skips_every_table() {
        let rows = vec![
            vec!["pre".to_string()],
            vec!["Tabela 1".to_string()],
            vec!["x".to_string()],
        ];
        let table = Table::from_rows(rows, 1).unwrap();

        assert!(table.split("^Tabela", 0, usize::MAX).unwrap().is_empty());
        assert!(sheet().split("^Tabela ", 0, usize::MAX - 1).unwrap().is_empty());
    }

    #[test]
    fn test_split_no_match() {
        assert!(sheet().split("^Quadro", 0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_split_errors() {
        assert!(matches!(
            sheet().split("Tabela", 9, 1),
            Err(Error::ColumnOutOfBounds(9, 2))
        ));
        assert!(matches!(
            sheet().split("Tabela (", 0, 1),
            Err(Error::InvalidPattern(_))
        ));
    }
}
