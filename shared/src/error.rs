//! Errors raised while reducing provider payloads

use thiserror::Error;

/// Failures of the satellite and soil moisture reducers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionError {
    /// A record does not have the layout the provider documents
    #[error("Malformed record at index {index}: {detail}")]
    DataShape { index: usize, detail: String },

    #[error("Missing series: {0}")]
    MissingSeries(String),

    /// Series present but without a single usable sample
    #[error("Insufficient data in series: {}", series.join(", "))]
    InsufficientData { series: Vec<String> },
}

impl ReductionError {
    pub fn data_shape(index: usize, detail: impl Into<String>) -> Self {
        Self::DataShape {
            index,
            detail: detail.into(),
        }
    }
}

/// Result type alias for reductions
pub type ReductionResult<T> = Result<T, ReductionError>;
