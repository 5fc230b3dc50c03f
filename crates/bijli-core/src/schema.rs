//! Required column sets and the ingestion-time schema check.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::record::Column;

/// Columns an input must carry before any processing happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredSchema {
    columns: Vec<Column>,
}

impl RequiredSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Feeding Grid, Division, Outage Reason, Category, Feeder, Diff in mins.
    pub fn base() -> Self {
        Self::new(vec![
            Column::FeedingGrid,
            Column::Division,
            Column::OutageReason,
            Column::Category,
            Column::Feeder,
            Column::DiffInMinutes,
        ])
    }

    /// The base set plus Zone, Circle and Start Time.
    pub fn extended() -> Self {
        let mut schema = Self::base();
        schema
            .columns
            .extend([Column::Zone, Column::Circle, Column::StartTime]);
        schema
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Required headers absent from `present`, in schema order.
    pub fn missing(&self, present: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.header())
            .filter(|header| !present.iter().any(|p| p == header))
            .map(String::from)
            .collect()
    }

    pub fn validate(&self, present: &[String]) -> Result<(), SchemaError> {
        let missing = self.missing(present);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError {
                missing,
                present: present.to_vec(),
            })
        }
    }
}

impl Default for RequiredSchema {
    fn default() -> Self {
        Self::base()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn base_schema_accepts_complete_header() {
        let present = headers(&[
            "Feeding Grid",
            "Division",
            "Outage Reason",
            "Category",
            "Feeder",
            "Diff in mins",
            "Remarks",
        ]);
        assert!(RequiredSchema::base().validate(&present).is_ok());
    }

    #[test]
    fn reports_exactly_the_missing_columns() {
        let present = headers(&[
            "Feeding Grid",
            "Division",
            "Outage Reason",
            "Category",
            "Diff in mins",
        ]);
        let err = RequiredSchema::base().validate(&present).unwrap_err();
        assert_eq!(err.missing, vec!["Feeder".to_string()]);
        assert_eq!(err.present, present);
    }

    #[test]
    fn extended_schema_requires_location_columns() {
        let present = headers(&[
            "Feeding Grid",
            "Division",
            "Outage Reason",
            "Category",
            "Feeder",
            "Diff in mins",
        ]);
        let missing = RequiredSchema::extended().missing(&present);
        assert_eq!(missing, headers(&["Zone", "Circle", "Start Time"]));
    }
}
