//! Export of analysis results.
//!
//! The CSV header is the displayed header and no index column is written, so
//! re-reading an export gives back the same columns and cells.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use bijli_core::{DisplayRow, DisplayTable, OutputColumn};
use polars::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;

use crate::error::IoResult;

/// Result table as a frame. Annotations are Int64, everything else Utf8.
pub fn display_frame(table: &DisplayTable) -> IoResult<DataFrame> {
    let series: Vec<Series> = table
        .columns
        .iter()
        .map(|column| match column {
            OutputColumn::Count => Series::new(
                column.header(),
                table.rows.iter().map(|r| r.count as i64).collect::<Vec<i64>>(),
            ),
            OutputColumn::GroupId => Series::new(
                column.header(),
                table
                    .rows
                    .iter()
                    .map(|r| r.group_id as i64)
                    .collect::<Vec<i64>>(),
            ),
            _ => Series::new(
                column.header(),
                table
                    .rows
                    .iter()
                    .map(|r| r.cell(column))
                    .collect::<Vec<String>>(),
            ),
        })
        .collect();
    Ok(DataFrame::new(series)?)
}

pub fn write_csv<W: Write>(table: &DisplayTable, writer: &mut W) -> IoResult<()> {
    let mut frame = display_frame(table)?;
    CsvWriter::new(writer).finish(&mut frame)?;
    Ok(())
}

pub fn export_csv(table: &DisplayTable, path: impl AsRef<Path>) -> IoResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    write_csv(table, &mut file)?;
    info!(path = %path.display(), rows = table.len(), "exported duplicate outages");
    Ok(())
}

/// One result row as a JSON object keyed by the displayed header.
struct JsonRow<'a> {
    columns: &'a [OutputColumn],
    row: &'a DisplayRow,
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            match column {
                OutputColumn::Count => map.serialize_entry(column.header(), &self.row.count)?,
                OutputColumn::GroupId => {
                    map.serialize_entry(column.header(), &self.row.group_id)?
                }
                _ => map.serialize_entry(column.header(), &self.row.cell(column))?,
            }
        }
        map.end()
    }
}

/// Array of row objects; keys keep projection order and annotations stay numbers.
pub fn write_json<W: Write>(table: &DisplayTable, writer: &mut W) -> IoResult<()> {
    let rows: Vec<JsonRow<'_>> = table
        .rows
        .iter()
        .map(|row| JsonRow {
            columns: &table.columns,
            row,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}
