//! Untyped, string-celled table handed over by the I/O layer.

use std::collections::HashSet;

use crate::error::{AnalysisError, AnalysisResult};
use crate::record::{Column, OutageRecord};
use crate::schema::RequiredSchema;

/// Header plus rows of optional text cells. `None` is an empty/null cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> AnalysisResult<Self> {
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(AnalysisError::MalformedInput(format!(
                    "duplicate column '{name}' in header"
                )));
            }
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(AnalysisError::MalformedInput(format!(
                "row {idx} has {} fields, header has {}",
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Build from string literals; empty strings become null cells.
    pub fn from_text_rows(columns: &[&str], rows: &[&[&str]]) -> AnalysisResult<Self> {
        Self::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                        .collect::<Vec<_>>()
                })
                .collect(),
        )
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column)?.as_deref()
    }

    /// Validate `schema` and type every row.
    ///
    /// Catalogue columns not required by the schema are still read when the
    /// file has them, so optional location columns survive into the output.
    pub fn records(&self, schema: &RequiredSchema) -> AnalysisResult<Vec<OutageRecord>> {
        schema.validate(&self.columns)?;

        let positions: Vec<(Column, usize)> = Column::ALL
            .into_iter()
            .filter_map(|c| self.column_index(c.header()).map(|idx| (c, idx)))
            .collect();

        let mut records = Vec::with_capacity(self.rows.len());
        for (row_idx, row) in self.rows.iter().enumerate() {
            let mut record = OutageRecord::blank(row_idx);
            for &(column, idx) in &positions {
                let cell = row[idx].as_deref();
                if column == Column::DiffInMinutes {
                    record.diff_in_mins = match cell.map(str::trim) {
                        None | Some("") => None,
                        Some(text) => Some(text.parse().map_err(|err| {
                            AnalysisError::InvalidValue {
                                row: row_idx,
                                column: column.header().to_string(),
                                value: text.to_string(),
                                reason: format!("{err}"),
                            }
                        })?),
                    };
                } else {
                    record.set_text(column, cell.unwrap_or_default().to_string());
                }
            }
            records.push(record);
        }
        Ok(records)
    }
}
