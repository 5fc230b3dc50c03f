//! CSV ingestion into a [`RawTable`].
//!
//! Schema inference is switched off so every column arrives as text exactly
//! as written; typing happens in `bijli-core` against the required schema.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use bijli_core::{AnalysisError, RawTable};
use polars::prelude::*;
use tracing::debug;

use crate::error::{IoError, IoResult};

pub fn read_outage_csv(path: impl AsRef<Path>) -> IoResult<RawTable> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let frame = CsvReader::new(file)
        .has_header(true)
        .infer_schema(Some(0))
        .finish()
        .map_err(|err| IoError::malformed(format!("reading {}: {err}", path.display())))?;
    debug!(path = %path.display(), rows = frame.height(), "read outage report");
    frame_to_table(&frame)
}

/// Parse an uploaded byte stream.
pub fn read_outage_bytes(bytes: &[u8]) -> IoResult<RawTable> {
    let frame = CsvReader::new(Cursor::new(bytes.to_vec()))
        .has_header(true)
        .infer_schema(Some(0))
        .finish()
        .map_err(|err| IoError::malformed(format!("reading CSV: {err}")))?;
    frame_to_table(&frame)
}

/// polars renames a repeated header to `<name>_duplicated_<n>`; report the
/// original name when that is what happened.
fn renamed_duplicate<'a>(name: &'a str, columns: &[String]) -> Option<&'a str> {
    let (base, suffix) = name.rsplit_once("_duplicated_")?;
    let numbered = !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit());
    (numbered && columns.iter().any(|c| c == base)).then_some(base)
}

/// Short records come back null-padded and are kept as blank cells; long
/// records already fail inside the CSV parser.
fn frame_to_table(frame: &DataFrame) -> IoResult<RawTable> {
    let columns: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    if let Some(base) = columns.iter().find_map(|name| renamed_duplicate(name, &columns)) {
        return Err(IoError::malformed(format!("duplicate column '{base}' in header")));
    }

    let mut rows: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(columns.len()); frame.height()];
    for series in frame.get_columns() {
        let text = series
            .cast(&DataType::Utf8)
            .map_err(|err| IoError::malformed(format!("column '{}': {err}", series.name())))?;
        let values = text.utf8()?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.push(value.map(String::from));
        }
    }
    RawTable::new(columns, rows).map_err(|err| match err {
        AnalysisError::MalformedInput(message) => IoError::Malformed(message),
        other => IoError::Analysis(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_every_cell_as_text() {
        let csv = "Feeding Grid,Feeder,Diff in mins\nGridX,0012,30.0\nGridY,,7\n";
        let table = read_outage_bytes(csv.as_bytes()).unwrap();
        assert_eq!(table.columns(), ["Feeding Grid", "Feeder", "Diff in mins"]);
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(0, 1), Some("0012"));
        assert_eq!(table.cell(0, 2), Some("30.0"));
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn quoted_commas_stay_in_one_cell() {
        let csv = "Feeding Grid,Outage Reason\nGridX,\"11kV line, DT damaged\"\n";
        let table = read_outage_bytes(csv.as_bytes()).unwrap();
        assert_eq!(table.cell(0, 1), Some("11kV line, DT damaged"));
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = read_outage_bytes(b"").unwrap_err();
        assert!(matches!(err, IoError::Malformed(_)));
    }

    #[test]
    fn repeated_header_is_malformed() {
        let csv = "Feeding Grid,Feeding Grid,Diff in mins\nGridX,GridY,30\n";
        match read_outage_bytes(csv.as_bytes()).unwrap_err() {
            IoError::Malformed(message) => assert!(message.contains("'Feeding Grid'")),
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn header_that_only_looks_renamed_is_kept() {
        let csv = "Feeder,Feeder_duplicated_x,Notes_duplicated_0\nF1,a,b\n";
        let table = read_outage_bytes(csv.as_bytes()).unwrap();
        assert_eq!(table.columns().len(), 3);
    }

    #[test]
    fn short_rows_are_padded_with_blanks() {
        let csv = "Feeding Grid,Division,Outage Reason,Category,Feeder,Diff in mins\nG,D,R\n";
        let table = read_outage_bytes(csv.as_bytes()).unwrap();
        assert_eq!(table.height(), 1);
        assert_eq!(table.cell(0, 2), Some("R"));
        assert_eq!(table.cell(0, 3), None);
        assert_eq!(table.cell(0, 5), None);
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("outages.csv");
        fs::write(&path, "Feeding Grid,Diff in mins\nGridX,30\n").unwrap();
        let table = read_outage_csv(&path).unwrap();
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = read_outage_csv(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
