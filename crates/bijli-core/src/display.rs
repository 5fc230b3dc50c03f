//! Result table of an analysis: duplicate rows annotated with their group.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::profile::OutputColumn;
use crate::record::OutageRecord;

/// A surviving record with its duplicate-group annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub record: OutageRecord,
    /// Size of the duplicate group this row belongs to
    pub count: usize,
    /// 1-based, numbered in the order clusters appear in the output
    pub group_id: usize,
    /// Pass-through cells keyed by source header
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl DisplayRow {
    pub fn cell(&self, column: &OutputColumn) -> String {
        match column {
            OutputColumn::Field(field) => self.record.text(*field).into_owned(),
            OutputColumn::Count => self.count.to_string(),
            OutputColumn::GroupId => self.group_id.to_string(),
            OutputColumn::Passthrough(name) => self.extra.get(name).cloned().unwrap_or_default(),
        }
    }
}

/// Row counts at each pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub input_rows: usize,
    /// Dropped by the reason filter
    pub excluded_rows: usize,
    /// Blank group-key component; never grouped
    pub ungroupable_rows: usize,
    /// Dropped by the feeding-grid frequency threshold
    pub below_threshold_rows: usize,
    /// Rows that took part in grouping
    pub candidate_rows: usize,
    pub duplicate_groups: usize,
    pub output_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTable {
    pub columns: Vec<OutputColumn>,
    pub rows: Vec<DisplayRow>,
    pub summary: AnalysisSummary,
}

impl DisplayTable {
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// No duplicates found. Distinct from a failed analysis.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<String> {
        let column = self.columns.get(column)?;
        self.rows.get(row).map(|r| r.cell(column))
    }

    /// Projected cells of every row, in display order.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().map(|c| row.cell(c)).collect())
            .collect()
    }

    /// Consecutive runs of rows sharing a group id.
    pub fn groups(&self) -> Vec<(usize, &[DisplayRow])> {
        let mut groups = Vec::new();
        let mut start = 0;
        for idx in 1..=self.rows.len() {
            if idx == self.rows.len() || self.rows[idx].group_id != self.rows[start].group_id {
                groups.push((self.rows[start].group_id, &self.rows[start..idx]));
                start = idx;
            }
        }
        groups
    }
}
