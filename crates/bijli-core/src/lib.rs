//! # bijli-core: outage duplicate analysis
//!
//! Turns an outage-report table into the subset of rows that share a group
//! key with at least one other row, annotated with the group size and ranked
//! by it.
//!
//! ## Pipeline
//!
//! 1. Schema validation against the profile's [`RequiredSchema`]
//! 2. Reason-code filtering ([`ReasonFilter`]): `66KV`/`220KV` prefixes dropped
//! 3. Optional per-grid frequency threshold
//! 4. Grouping on the profile's key; groups of one are discarded
//! 5. Each surviving row gets its group's `count` and `group_id`
//! 6. Ordering by descending count, optionally keeping groups adjacent
//! 7. Projection onto the profile's output columns
//!
//! ```
//! use bijli_core::{analyze, Preset, RawTable};
//!
//! let table = RawTable::from_text_rows(
//!     &["Feeding Grid", "Division", "Outage Reason", "Category", "Feeder", "Diff in mins"],
//!     &[
//!         &["GridX", "D1", "11kV line/DT Maintenance Work", "C", "F1", "30"],
//!         &["GridX", "D1", "11kV line/DT Maintenance Work", "C", "F2", "30"],
//!         &["GridX", "D1", "11kV line/DT Maintenance Work", "C", "F3", "45"],
//!     ],
//! )
//! .unwrap();
//! let result = analyze(&table, &Preset::GridReasonDuration.profile()).unwrap();
//! assert_eq!(result.len(), 2);
//! assert!(result.rows.iter().all(|row| row.count == 2));
//! ```

pub mod analysis;
pub mod display;
pub mod error;
pub mod profile;
pub mod reason;
pub mod record;
pub mod schema;
pub mod table;
pub mod units;

pub use analysis::{analyze, GroupKey};
pub use display::{AnalysisSummary, DisplayRow, DisplayTable};
pub use error::{AnalysisError, AnalysisResult, SchemaError};
pub use profile::{AnalysisProfile, OutputColumn, Preset};
pub use reason::ReasonFilter;
pub use record::{Column, OutageRecord};
pub use schema::RequiredSchema;
pub use table::RawTable;
pub use units::Minutes;
