//! End-to-end tests for a workbook session (open -> load -> close)

use pretty_assertions::assert_eq;
use sheetframe::prelude::*;
use sheetframe::CsvError;
use std::path::Path;

const SHEET: &str = "a;b\n1;2\n3;4";

fn loader() -> WorkbookTableLoader<MemoryReader> {
    let reader = MemoryReader::new("excel_to_df v0.2.56")
        .with_sheet("Data", SHEET)
        .with_sheet("Empty", "")
        .with_sheet("Ragged", "1;2\n3;4;5\n");
    WorkbookTableLoader::new(reader)
}

/// Closing a loader that never opened anything is harmless
#[test]
fn test_close_without_open() {
    let mut loader = loader();
    loader.close();
    loader.close();

    assert!(!loader.is_open());
    assert_eq!(loader.reader().close_calls(), 2);
    assert_eq!(loader.reader().open_calls(), 0);
}

/// A second open while a workbook is open does not reach the reader
#[test]
fn test_double_open_calls_reader_once() {
    let mut loader = loader();
    loader.open("first.xlsx").unwrap();
    loader.open("second.xlsx").unwrap();

    assert_eq!(loader.reader().open_calls(), 1);
    assert_eq!(loader.open_path(), Some(Path::new("first.xlsx")));
}

/// Reopening after close reaches the reader again
#[test]
fn test_reopen_after_close() {
    let mut loader = loader();
    loader.open("book.xlsx").unwrap();
    loader.close();
    loader.open("book.xlsx").unwrap();

    assert_eq!(loader.reader().open_calls(), 2);
    assert!(loader.is_open());
}

/// A failed open is reported and leaves the loader closed
#[test]
fn test_open_failure() {
    let mut loader = WorkbookTableLoader::new(MemoryReader::default().with_open_status(-2));

    let err = loader.open("broken.xlsx").unwrap_err();
    assert!(matches!(err, LoadError::OpenFailed { code: -2 }));
    assert_eq!(err.open_status(), Some(OpenStatus::InvalidWorkbook));
    assert!(!loader.is_open());

    // A failed open is retried on the next request
    let _ = loader.open("broken.xlsx");
    assert_eq!(loader.reader().open_calls(), 2);
}

/// By default the first record is data
#[test]
fn test_load_sheet_without_header() {
    let mut loader = loader();
    loader.open("book.xlsx").unwrap();
    let table = loader.load_sheet("Data").unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row(0).unwrap(), ["a", "b"]);
    assert_eq!(table.row(1).unwrap(), ["1", "2"]);
    assert_eq!(table.row(2).unwrap(), ["3", "4"]);
}

/// With a header row, the first record names the columns
#[test]
fn test_load_sheet_with_header() {
    let options = ReadOptions {
        header: HeaderMode::FirstRow,
        ..Default::default()
    };
    let mut loader = loader().with_read_options(options);
    loader.open("book.xlsx").unwrap();
    let table = loader.load_sheet("Data").unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 2);
    assert_eq!(table.row(0).unwrap(), ["1", "2"]);
    assert_eq!(table.row(1).unwrap(), ["3", "4"]);
    assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(table.value(1, 0), Some(FieldValue::Integer(3)));
}

/// Empty sheet text is an error, never an empty table
#[test]
fn test_empty_sheet_is_not_found() {
    let mut loader = loader();
    loader.open("book.xlsx").unwrap();

    let err = loader.load_sheet("Empty").unwrap_err();
    assert!(matches!(err, LoadError::SheetNotFound(ref name) if name == "Empty"));

    let err = loader.load_sheet("Nope").unwrap_err();
    assert!(matches!(err, LoadError::SheetNotFound(_)));
}

/// A record wider than the lookahead is a parse error
#[test]
fn test_malformed_sheet_is_parse_error() {
    let mut loader = loader();
    loader.open("book.xlsx").unwrap();

    match loader.load_sheet("Ragged").unwrap_err() {
        LoadError::Parse { sheet, source } => {
            assert_eq!(sheet, "Ragged");
            assert!(matches!(source, CsvError::Parse { line: 2, .. }));
        }
        other => panic!("Expected Parse error, got {other:?}"),
    }
}

/// Loading with nothing open is left to the reader to reject
#[test]
fn test_load_sheet_while_closed() {
    let mut loader = loader();
    let err = loader.load_sheet("Data").unwrap_err();

    assert!(matches!(err, LoadError::SheetNotFound(_)));
    assert_eq!(loader.reader().fetches().len(), 1);
}

/// Writing a loaded table with the same separator reproduces its rows
#[test]
fn test_roundtrip_through_writer() {
    let mut loader = loader();
    let table = loader.read_sheet("book.xlsx", "Data").unwrap();

    let text = DelimitedWriter::to_string(&table, &WriteOptions::default()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, SHEET.lines().collect::<Vec<_>>());

    let reread = DelimitedReader::read_str(&text, &ReadOptions::default()).unwrap();
    assert_eq!(reread.rows(), table.rows());
}

/// The roundtrip holds with a header as well
#[test]
fn test_roundtrip_with_header() {
    let options = ReadOptions {
        header: HeaderMode::FirstRow,
        ..Default::default()
    };
    let mut loader = loader().with_read_options(options);
    let table = loader.read_sheet("book.xlsx", "Data").unwrap();

    let write = WriteOptions {
        write_header: true,
        ..Default::default()
    };
    let text = DelimitedWriter::to_string(&table, &write).unwrap();
    assert_eq!(text, format!("{SHEET}\n"));
}

/// read_sheet closes even when loading fails
#[test]
fn test_read_sheet_closes_on_error() {
    let mut loader = loader();
    assert!(loader.read_sheet("book.xlsx", "Empty").is_err());

    assert!(!loader.is_open());
    assert_eq!(loader.reader().close_calls(), 1);
}

/// The version string is passed through unmodified
#[test]
fn test_version_passthrough() {
    let loader = WorkbookTableLoader::new(MemoryReader::new("  v0.2.56 (build 7)\n"));
    assert_eq!(loader.version(), "  v0.2.56 (build 7)\n");
}

/// The chosen fetch mode is forwarded per call
#[test]
fn test_load_sheet_with_mode() {
    let mut loader = loader();
    loader.open("book.xlsx").unwrap();
    loader
        .load_sheet_with("Data", FetchMode::SingleThread, &ReadOptions::default())
        .unwrap();
    loader.load_sheet("Data").unwrap();

    let modes: Vec<FetchMode> = loader.reader().fetches().iter().map(|(_, m)| *m).collect();
    assert_eq!(modes, vec![FetchMode::SingleThread, FetchMode::MultiThread]);
}

/// Loaded sheets can be split into their stacked tables
#[test]
fn test_load_then_split() {
    let text = "Relatorio\nTabela 1\nagente;mwh\nA;10\nTabela 2\nagente;mwh\nB;20\nC;30\n";
    let reader = MemoryReader::default().with_sheet("Report", text);
    let options = ReadOptions {
        guess_rows: 3,
        ..Default::default()
    };
    let mut loader = WorkbookTableLoader::new(reader).with_read_options(options);

    let table = loader.read_sheet("report.xlsx", "Report").unwrap();
    let parts = table.split("^Tabela", 0, 1).unwrap();

    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].row_count(), 1);
    assert_eq!(parts[1].row_count(), 2);
    assert_eq!(parts[1].column_index("mwh"), Some(1));
    assert_eq!(parts[1].value(1, 1), Some(FieldValue::Integer(30)));
}
