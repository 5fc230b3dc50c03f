//! Analysis profiles: which columns are required, which reasons survive,
//! what makes two records duplicates, and what gets emitted.
//!
//! Built-in profiles are exposed through [`Preset`]; custom ones deserialize
//! from TOML/JSON with the same field names.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::reason::ReasonFilter;
use crate::record::Column;
use crate::schema::RequiredSchema;

pub const COUNT_COLUMN: &str = "count";
pub const GROUP_ID_COLUMN: &str = "group_id";

/// One column of the emitted table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputColumn {
    Field(Column),
    Count,
    GroupId,
    /// Any other source column, copied through verbatim.
    Passthrough(String),
}

impl OutputColumn {
    pub fn header(&self) -> &str {
        match self {
            OutputColumn::Field(column) => column.header(),
            OutputColumn::Count => COUNT_COLUMN,
            OutputColumn::GroupId => GROUP_ID_COLUMN,
            OutputColumn::Passthrough(name) => name,
        }
    }
}

impl From<String> for OutputColumn {
    fn from(name: String) -> Self {
        match name.as_str() {
            COUNT_COLUMN => OutputColumn::Count,
            GROUP_ID_COLUMN => OutputColumn::GroupId,
            other => match Column::from_header(other) {
                Some(column) => OutputColumn::Field(column),
                None => OutputColumn::Passthrough(name),
            },
        }
    }
}

impl From<OutputColumn> for String {
    fn from(column: OutputColumn) -> Self {
        column.header().to_string()
    }
}

impl From<Column> for OutputColumn {
    fn from(column: Column) -> Self {
        OutputColumn::Field(column)
    }
}

impl fmt::Display for OutputColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Full configuration of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisProfile {
    pub name: String,
    #[serde(default)]
    pub schema: RequiredSchema,
    #[serde(default)]
    pub reason_filter: ReasonFilter,
    pub group_key: Vec<Column>,
    /// Keep only feeding grids seen more than this many times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_threshold: Option<usize>,
    /// Keep rows of one duplicate group adjacent in the output.
    #[serde(default)]
    pub cluster_groups: bool,
    pub projection: Vec<OutputColumn>,
}

impl AnalysisProfile {
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.group_key.is_empty() {
            return Err(AnalysisError::Config(format!(
                "profile '{}' has an empty group key",
                self.name
            )));
        }
        let mut seen = HashSet::new();
        if let Some(column) = self.group_key.iter().find(|c| !seen.insert(**c)) {
            return Err(AnalysisError::Config(format!(
                "profile '{}' repeats '{}' in its group key",
                self.name, column
            )));
        }
        if let Some(column) = self.group_key.iter().find(|c| !self.schema.contains(**c)) {
            return Err(AnalysisError::Config(format!(
                "group key column '{}' of profile '{}' is not a required column",
                column, self.name
            )));
        }
        if self.projection.is_empty() {
            return Err(AnalysisError::Config(format!(
                "profile '{}' projects no columns",
                self.name
            )));
        }
        let mut seen = HashSet::new();
        if let Some(column) = self.projection.iter().find(|c| !seen.insert(c.header())) {
            return Err(AnalysisError::Config(format!(
                "profile '{}' projects '{}' twice",
                self.name, column
            )));
        }
        if let Some(column) = self.projection.iter().find_map(|c| match c {
            OutputColumn::Field(field) if !self.schema.contains(*field) => Some(field),
            _ => None,
        }) {
            return Err(AnalysisError::Config(format!(
                "projected column '{}' of profile '{}' is not a required column",
                column, self.name
            )));
        }
        Ok(())
    }

    /// Source columns the projection copies through verbatim.
    pub fn passthrough_columns(&self) -> impl Iterator<Item = &str> {
        self.projection.iter().filter_map(|c| match c {
            OutputColumn::Passthrough(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn header(&self) -> Vec<String> {
        self.projection.iter().map(|c| c.header().to_string()).collect()
    }
}

impl Default for AnalysisProfile {
    fn default() -> Self {
        Preset::default().profile()
    }
}

/// Built-in analysis profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Same grid, reason and duration
    GridReasonDuration,
    /// All six required columns equal
    FullKey,
    /// Same grid and duration, clustered by group
    #[default]
    GridDuration,
    /// 11kV outages on grids seen more than twice
    GridFrequency,
    /// Grid/reason/duration over the two 11kV maintenance reasons only
    MaintenanceReasons,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::GridReasonDuration,
        Preset::FullKey,
        Preset::GridDuration,
        Preset::GridFrequency,
        Preset::MaintenanceReasons,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::GridReasonDuration => "grid-reason-duration",
            Preset::FullKey => "full-key",
            Preset::GridDuration => "grid-duration",
            Preset::GridFrequency => "grid-frequency",
            Preset::MaintenanceReasons => "maintenance-reasons",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::GridReasonDuration => "duplicates on feeding grid, outage reason and duration",
            Preset::FullKey => "duplicates on all six required columns",
            Preset::GridDuration => {
                "duplicates on feeding grid and duration, clustered by group (default)"
            }
            Preset::GridFrequency => {
                "11kV outages on feeding grids reported more than twice (deprecated)"
            }
            Preset::MaintenanceReasons => {
                "grid/reason/duration duplicates among 11kV maintenance and insulator outages"
            }
        }
    }

    pub fn profile(self) -> AnalysisProfile {
        use Column::*;
        let key_projection = |key: &[Column]| -> Vec<OutputColumn> {
            key.iter()
                .copied()
                .map(OutputColumn::Field)
                .chain([OutputColumn::Count])
                .collect()
        };
        match self {
            Preset::GridReasonDuration => {
                let key = vec![FeedingGrid, OutageReason, DiffInMinutes];
                AnalysisProfile {
                    name: self.name().to_string(),
                    schema: RequiredSchema::base(),
                    reason_filter: ReasonFilter::default(),
                    projection: key_projection(&key),
                    group_key: key,
                    frequency_threshold: None,
                    cluster_groups: false,
                }
            }
            Preset::FullKey => {
                let schema = RequiredSchema::base();
                let key = schema.columns().to_vec();
                AnalysisProfile {
                    name: self.name().to_string(),
                    schema,
                    reason_filter: ReasonFilter::default(),
                    projection: key_projection(&key),
                    group_key: key,
                    frequency_threshold: None,
                    cluster_groups: false,
                }
            }
            Preset::GridDuration => AnalysisProfile {
                name: self.name().to_string(),
                schema: RequiredSchema::extended(),
                reason_filter: ReasonFilter::default(),
                group_key: vec![FeedingGrid, DiffInMinutes],
                frequency_threshold: None,
                cluster_groups: true,
                projection: std::iter::once(OutputColumn::GroupId)
                    .chain(
                        [
                            FeedingGrid,
                            Zone,
                            Circle,
                            Division,
                            Feeder,
                            OutageReason,
                            Category,
                            StartTime,
                            DiffInMinutes,
                        ]
                        .map(OutputColumn::Field),
                    )
                    .chain([OutputColumn::Count])
                    .collect(),
            },
            Preset::GridFrequency => AnalysisProfile {
                name: self.name().to_string(),
                schema: RequiredSchema::base(),
                reason_filter: ReasonFilter::requiring("11KV"),
                group_key: vec![FeedingGrid],
                frequency_threshold: Some(2),
                cluster_groups: false,
                projection: [FeedingGrid, Division, Feeder, OutageReason, DiffInMinutes]
                    .map(OutputColumn::Field)
                    .into_iter()
                    .chain([OutputColumn::Count])
                    .collect(),
            },
            Preset::MaintenanceReasons => {
                let key = vec![FeedingGrid, OutageReason, DiffInMinutes];
                AnalysisProfile {
                    name: self.name().to_string(),
                    schema: RequiredSchema::base(),
                    reason_filter: ReasonFilter::allowing([
                        "11kV line/DT Maintenance Work",
                        "11kV line Disc/Pin Insulator damaged/ flashed",
                    ]),
                    projection: key_projection(&key),
                    group_key: key,
                    frequency_threshold: None,
                    cluster_groups: false,
                }
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{s}'; expected one of {}", names.join(", "))
            })
    }
}
