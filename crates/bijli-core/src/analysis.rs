//! The duplicate-outage pipeline.
//!
//! validate -> reason filter -> (frequency threshold) -> group -> enrich ->
//! sort -> project. Every stage produces a new row set; the input table is
//! never modified.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::display::{AnalysisSummary, DisplayRow, DisplayTable};
use crate::error::{AnalysisResult, SchemaError};
use crate::profile::AnalysisProfile;
use crate::record::{Column, OutageRecord};
use crate::table::RawTable;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyPart {
    Text(String),
    Minutes(u64),
}

/// Values of the group-key columns for one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(Vec<KeyPart>);

impl GroupKey {
    /// `None` when any key cell is blank; such rows are not grouped.
    pub fn of(record: &OutageRecord, columns: &[Column]) -> Option<GroupKey> {
        columns
            .iter()
            .map(|&column| match column {
                Column::DiffInMinutes => record.diff_in_mins.map(|m| KeyPart::Minutes(m.key_bits())),
                other => record
                    .value(other)
                    .filter(|text| !text.is_empty())
                    .map(|text| KeyPart::Text(text.into_owned())),
            })
            .collect::<Option<Vec<_>>>()
            .map(GroupKey)
    }
}

/// Run the full pipeline over `table`.
///
/// An empty [`DisplayTable`] means no duplicates were found.
pub fn analyze(table: &RawTable, profile: &AnalysisProfile) -> AnalysisResult<DisplayTable> {
    profile.validate()?;

    let present = table.columns();
    let mut missing = profile.schema.missing(present);
    missing.extend(
        profile
            .passthrough_columns()
            .filter(|name| table.column_index(name).is_none())
            .map(String::from),
    );
    if !missing.is_empty() {
        return Err(SchemaError {
            missing,
            present: present.to_vec(),
        }
        .into());
    }

    let records = table.records(&profile.schema)?;
    let mut summary = AnalysisSummary {
        input_rows: records.len(),
        ..AnalysisSummary::default()
    };

    let filtered: Vec<&OutageRecord> = records
        .iter()
        .filter(|r| profile.reason_filter.keeps(&r.outage_reason))
        .collect();
    summary.excluded_rows = records.len() - filtered.len();

    let filtered = match profile.frequency_threshold {
        Some(threshold) => {
            let before = filtered.len();
            let kept = retain_frequent_grids(filtered, threshold);
            summary.below_threshold_rows = before - kept.len();
            kept
        }
        None => filtered,
    };

    let keyed: Vec<(&OutageRecord, GroupKey)> = filtered
        .iter()
        .filter_map(|r| GroupKey::of(r, &profile.group_key).map(|key| (*r, key)))
        .collect();
    summary.ungroupable_rows = filtered.len() - keyed.len();
    summary.candidate_rows = keyed.len();

    let mut counts: HashMap<&GroupKey, usize> = HashMap::new();
    for (_, key) in &keyed {
        *counts.entry(key).or_insert(0) += 1;
    }

    // First source row of each key orders clusters of equal size.
    let mut first_row: HashMap<&GroupKey, usize> = HashMap::new();
    let mut ranked: Vec<(DisplayRow, &GroupKey)> = Vec::new();
    for (record, key) in &keyed {
        let count = counts[key];
        if count < 2 {
            continue;
        }
        first_row.entry(key).or_insert(record.row);
        ranked.push((
            DisplayRow {
                record: (*record).clone(),
                count,
                group_id: 0,
                extra: passthrough_cells(table, profile, record.row),
            },
            key,
        ));
    }
    summary.duplicate_groups = first_row.len();

    if profile.cluster_groups {
        ranked.sort_by(|(a, a_key), (b, b_key)| {
            b.count
                .cmp(&a.count)
                .then(first_row[a_key].cmp(&first_row[b_key]))
                .then(a.record.row.cmp(&b.record.row))
        });
    } else {
        ranked.sort_by(|(a, _), (b, _)| b.count.cmp(&a.count));
    }

    // Ids follow the output order: the first cluster displayed is group 1.
    let mut group_ids: HashMap<&GroupKey, usize> = HashMap::new();
    let rows: Vec<DisplayRow> = ranked
        .into_iter()
        .map(|(mut row, key)| {
            let next_id = group_ids.len() + 1;
            row.group_id = *group_ids.entry(key).or_insert(next_id);
            row
        })
        .collect();
    summary.output_rows = rows.len();

    debug!(profile = %profile.name, ?summary, "outage analysis finished");

    Ok(DisplayTable {
        columns: profile.projection.clone(),
        rows,
        summary,
    })
}

/// Keep rows whose feeding grid occurs more than `threshold` times.
fn retain_frequent_grids(rows: Vec<&OutageRecord>, threshold: usize) -> Vec<&OutageRecord> {
    let mut per_grid: HashMap<&str, usize> = HashMap::new();
    for record in &rows {
        *per_grid.entry(record.feeding_grid.as_str()).or_insert(0) += 1;
    }
    rows.iter()
        .copied()
        .filter(|r| per_grid[r.feeding_grid.as_str()] > threshold)
        .collect()
}

fn passthrough_cells(
    table: &RawTable,
    profile: &AnalysisProfile,
    row: usize,
) -> BTreeMap<String, String> {
    profile
        .passthrough_columns()
        .filter_map(|name| {
            let idx = table.column_index(name)?;
            Some((
                name.to_string(),
                table.cell(row, idx).unwrap_or_default().to_string(),
            ))
        })
        .collect()
}
