use bijli_core::{AnalysisError, SchemaError};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    /// File access errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors building or writing the result frame
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input that cannot be read as a table at all
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// Schema and value errors from the analysis itself
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IoError {
    pub fn malformed(message: impl Into<String>) -> Self {
        IoError::Malformed(message.into())
    }

    /// The schema failure, if this is one.
    pub fn schema(&self) -> Option<&SchemaError> {
        match self {
            IoError::Analysis(AnalysisError::Schema(err)) => Some(err),
            _ => None,
        }
    }
}

pub type IoResult<T> = Result<T, IoError>;
