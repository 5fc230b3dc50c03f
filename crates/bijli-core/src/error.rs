//! Error types for outage analysis.
//!
//! [`AnalysisError`] separates the user-correctable validation failure
//! ([`SchemaError`]) from structurally broken input and bad cell values, so a
//! host can report each one differently without aborting.

use std::fmt;

use thiserror::Error;

/// Required columns that are absent from an input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Missing columns, in schema order.
    pub missing: Vec<String>,
    /// Columns the input actually has, in file order.
    pub present: Vec<String>,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing required columns: {}; columns found: {}",
            self.missing.join(", "),
            if self.present.is_empty() {
                "(none)".to_string()
            } else {
                self.present.join(", ")
            }
        )
    }
}

impl std::error::Error for SchemaError {}

/// Unified error type for the analysis pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Required columns missing from the input
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Input that cannot be read as rows and columns at all
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A cell that cannot be interpreted for its column
    #[error("Invalid value {value:?} in column '{column}' at row {row}: {reason}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    /// Inconsistent analysis profile
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// True for failures the user fixes by supplying a different file.
    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::Schema(_))
    }
}

/// Convenience type alias for Results using AnalysisError.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
