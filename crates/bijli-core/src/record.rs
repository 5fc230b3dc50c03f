//! Column catalogue and the typed outage record.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Minutes;

/// Known columns of the outage export, with their exact header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    FeedingGrid,
    Zone,
    Circle,
    Division,
    OutageReason,
    Category,
    Feeder,
    StartTime,
    DiffInMinutes,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::FeedingGrid,
        Column::Zone,
        Column::Circle,
        Column::Division,
        Column::OutageReason,
        Column::Category,
        Column::Feeder,
        Column::StartTime,
        Column::DiffInMinutes,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::FeedingGrid => "Feeding Grid",
            Column::Zone => "Zone",
            Column::Circle => "Circle",
            Column::Division => "Division",
            Column::OutageReason => "Outage Reason",
            Column::Category => "Category",
            Column::Feeder => "Feeder",
            Column::StartTime => "Start Time",
            Column::DiffInMinutes => "Diff in mins",
        }
    }

    /// Exact header lookup. No trimming or case folding.
    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl Serialize for Column {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.header())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let header = String::deserialize(deserializer)?;
        Column::from_header(&header)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown column '{header}'")))
    }
}

/// One outage row, typed at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutageRecord {
    /// 0-based data row index in the source file
    pub row: usize,
    pub feeding_grid: String,
    pub zone: Option<String>,
    pub circle: Option<String>,
    pub division: String,
    pub outage_reason: String,
    pub category: String,
    pub feeder: String,
    pub start_time: Option<String>,
    pub diff_in_mins: Option<Minutes>,
}

impl OutageRecord {
    /// Empty record at `row`; used by builders and tests.
    pub fn blank(row: usize) -> Self {
        Self {
            row,
            feeding_grid: String::new(),
            zone: None,
            circle: None,
            division: String::new(),
            outage_reason: String::new(),
            category: String::new(),
            feeder: String::new(),
            start_time: None,
            diff_in_mins: None,
        }
    }

    /// Canonical text of `column`, or `None` when the cell is absent.
    pub fn value(&self, column: Column) -> Option<Cow<'_, str>> {
        match column {
            Column::FeedingGrid => Some(Cow::Borrowed(&self.feeding_grid)),
            Column::Zone => self.zone.as_deref().map(Cow::Borrowed),
            Column::Circle => self.circle.as_deref().map(Cow::Borrowed),
            Column::Division => Some(Cow::Borrowed(&self.division)),
            Column::OutageReason => Some(Cow::Borrowed(&self.outage_reason)),
            Column::Category => Some(Cow::Borrowed(&self.category)),
            Column::Feeder => Some(Cow::Borrowed(&self.feeder)),
            Column::StartTime => self.start_time.as_deref().map(Cow::Borrowed),
            Column::DiffInMinutes => self.diff_in_mins.map(|m| Cow::Owned(m.to_string())),
        }
    }

    /// Canonical text of `column`; absent cells render as the empty string.
    pub fn text(&self, column: Column) -> Cow<'_, str> {
        self.value(column).unwrap_or(Cow::Borrowed(""))
    }

    /// Store a text cell. `Diff in mins` is handled by the caller.
    pub(crate) fn set_text(&mut self, column: Column, value: String) {
        match column {
            Column::FeedingGrid => self.feeding_grid = value,
            Column::Zone => self.zone = Some(value),
            Column::Circle => self.circle = Some(value),
            Column::Division => self.division = value,
            Column::OutageReason => self.outage_reason = value,
            Column::Category => self.category = value,
            Column::Feeder => self.feeder = value,
            Column::StartTime => self.start_time = Some(value),
            Column::DiffInMinutes => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("feeding grid"), None);
        assert_eq!(Column::from_header(" Feeder"), None);
    }

    #[test]
    fn text_renders_canonical_minutes() {
        let mut record = OutageRecord::blank(0);
        record.diff_in_mins = Some(Minutes(45.0));
        record.feeding_grid = "GridX".into();
        assert_eq!(record.text(Column::DiffInMinutes), "45");
        assert_eq!(record.text(Column::FeedingGrid), "GridX");
        assert_eq!(record.text(Column::Zone), "");
        assert!(record.value(Column::Zone).is_none());
    }

    #[test]
    fn column_serializes_as_header() {
        let json = serde_json::to_string(&Column::DiffInMinutes).unwrap();
        assert_eq!(json, "\"Diff in mins\"");
        let back: Column = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Column::DiffInMinutes);
        assert!(serde_json::from_str::<Column>("\"Nope\"").is_err());
    }
}
