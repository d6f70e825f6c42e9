//! Historical weather models

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{ReductionError, ReductionResult};

/// Historical weather payload: named series of optional samples.
///
/// Only the series the service reads are validated; everything else the
/// provider returns is kept untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalWeatherResponse {
    series: BTreeMap<String, Value>,
}

impl HistoricalWeatherResponse {
    /// Wrap a provider payload. A body that is not a JSON object has no series.
    pub fn from_json(value: Value) -> Self {
        let series = match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        };
        Self { series }
    }

    /// Build a response from already-decoded sample vectors
    pub fn from_series<I, S>(series: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Option<f64>>)>,
        S: Into<String>,
    {
        let series = series
            .into_iter()
            .map(|(name, samples)| {
                let values = samples
                    .into_iter()
                    .map(|s| s.map(Value::from).unwrap_or(Value::Null))
                    .collect();
                (name.into(), Value::Array(values))
            })
            .collect();
        Self { series }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Samples of a named series; `None` entries mark intervals without a reading.
    ///
    /// A `null` series is treated as empty.
    pub fn series(&self, name: &str) -> ReductionResult<Vec<Option<f64>>> {
        let raw = self
            .series
            .get(name)
            .ok_or_else(|| ReductionError::MissingSeries(name.to_string()))?;

        match raw {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Null => Ok(None),
                    other => other.as_f64().map(Some).ok_or_else(|| {
                        ReductionError::data_shape(
                            index,
                            format!("non-numeric sample in '{}': {}", name, other),
                        )
                    }),
                })
                .collect(),
            other => Err(ReductionError::data_shape(
                0,
                format!("series '{}' is not an array: {}", name, other),
            )),
        }
    }
}
