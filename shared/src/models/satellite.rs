//! Satellite statistics models

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReductionError, ReductionResult};

/// Path of the daily band mean inside a provider statistics record
const BAND_MEAN_PATH: &str = "/outputs/data/bands/B0/stats/mean";

/// One day of satellite water-index statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySatelliteRecord {
    /// Observation date as reported by the provider, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Mean value of band B0 over the farm polygon
    pub band_mean: f64,
}

impl DailySatelliteRecord {
    /// Extract a record from the provider's nested JSON layout.
    ///
    /// Extraction is strict: a record without a numeric band mean is an
    /// upstream contract violation and is never defaulted.
    pub fn from_json(index: usize, value: &Value) -> ReductionResult<Self> {
        let mean = value.pointer(BAND_MEAN_PATH).ok_or_else(|| {
            ReductionError::data_shape(index, format!("missing field {}", BAND_MEAN_PATH))
        })?;

        let band_mean = mean.as_f64().ok_or_else(|| {
            ReductionError::data_shape(index, format!("non-numeric band mean: {}", mean))
        })?;

        let date = value
            .get("date")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self { date, band_mean })
    }
}
