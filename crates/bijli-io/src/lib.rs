//! # bijli-io: outage report ingestion and export
//!
//! Reads comma-separated outage reports through polars into the text table
//! `bijli-core` analyzes, and writes results back out as CSV or JSON.

pub mod error;
pub mod export;
pub mod reader;

use std::path::Path;

use bijli_core::{analyze, AnalysisProfile, DisplayTable};
use tracing::info;

pub use error::{IoError, IoResult};
pub use export::{display_frame, export_csv, write_csv, write_json};
pub use reader::{read_outage_bytes, read_outage_csv};

/// Read `path` and run `profile` over it.
pub fn analyze_csv(path: impl AsRef<Path>, profile: &AnalysisProfile) -> IoResult<DisplayTable> {
    let path = path.as_ref();
    let table = read_outage_csv(path)?;
    let result = analyze(&table, profile)?;
    info!(
        path = %path.display(),
        profile = %profile.name,
        input_rows = result.summary.input_rows,
        excluded_rows = result.summary.excluded_rows,
        ungroupable_rows = result.summary.ungroupable_rows,
        below_threshold_rows = result.summary.below_threshold_rows,
        duplicate_groups = result.summary.duplicate_groups,
        output_rows = result.summary.output_rows,
        "analyzed outage report"
    );
    Ok(result)
}
