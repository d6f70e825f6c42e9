//! Time-series reduction and the irrigation decision

use serde_json::Value;

use crate::error::{ReductionError, ReductionResult};
use crate::models::{
    DailySatelliteRecord, HistoricalWeatherResponse, IrrigationAlert, IrrigationDecision,
    SoilMoistureSummary,
};

// ============================================================================
// Tuning constants
// ============================================================================

/// Combined soil moisture strictly below this value triggers an alert.
/// Fixed; not part of the runtime configuration.
pub const IRRIGATION_THRESHOLD: f64 = 0.2;

/// Default length of the satellite statistics window, in days
pub const SATELLITE_WINDOW_DAYS: u32 = 90;

/// Default length of the historical weather window, in days
pub const WEATHER_WINDOW_DAYS: u32 = 7;

/// Default number of attempts for a provider request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub const SOIL_MOISTURE_4CM: &str = "soil moisture 4cm";
pub const SOIL_MOISTURE_14CM: &str = "soil moisture 14cm";

// ============================================================================
// Reducers
// ============================================================================

/// Arithmetic mean; an empty slice yields exactly `0`
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Drop intervals without a reading
pub fn present_samples(samples: &[Option<f64>]) -> Vec<f64> {
    samples.iter().flatten().copied().collect()
}

/// Parse every daily record, failing on the first malformed one
pub fn parse_satellite_records(records: &[Value]) -> ReductionResult<Vec<DailySatelliteRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(index, value)| DailySatelliteRecord::from_json(index, value))
        .collect()
}

/// Mean of the daily band means; `0` for an empty sequence
pub fn reduce_satellite(records: &[Value]) -> ReductionResult<f64> {
    let means: Vec<f64> = parse_satellite_records(records)?
        .iter()
        .map(|record| record.band_mean)
        .collect();
    Ok(mean(&means))
}

/// Average the shallow and mid-depth soil moisture series.
///
/// Both series must exist and report at least one interval. Intervals
/// without a reading are dropped; a series left with none averages to `0`,
/// and the combined average is `0` unless both series kept a reading.
pub fn reduce_soil_moisture(
    response: &HistoricalWeatherResponse,
) -> ReductionResult<SoilMoistureSummary> {
    let raw_shallow = response.series(SOIL_MOISTURE_4CM)?;
    let raw_mid = response.series(SOIL_MOISTURE_14CM)?;

    let empty: Vec<String> = [(SOIL_MOISTURE_4CM, &raw_shallow), (SOIL_MOISTURE_14CM, &raw_mid)]
        .into_iter()
        .filter(|(_, samples)| samples.is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if !empty.is_empty() {
        return Err(ReductionError::InsufficientData { series: empty });
    }

    let shallow = present_samples(&raw_shallow);
    let mid = present_samples(&raw_mid);
    let average_4cm = mean(&shallow);
    let average_14cm = mean(&mid);

    let combined = if !shallow.is_empty() && !mid.is_empty() {
        (average_4cm + average_14cm) / 2.0
    } else {
        0.0
    };

    Ok(SoilMoistureSummary {
        average_4cm,
        average_14cm,
        combined,
    })
}

// ============================================================================
// Decision
// ============================================================================

/// Alert depends on soil moisture only
pub fn classify_soil_moisture(combined_soil_moisture: f64) -> IrrigationAlert {
    if combined_soil_moisture < IRRIGATION_THRESHOLD {
        IrrigationAlert::NeedsIrrigation
    } else {
        IrrigationAlert::NoIrrigationNeeded
    }
}

pub fn decide(satellite_mean: f64, combined_soil_moisture: f64) -> IrrigationDecision {
    IrrigationDecision {
        composite_signal: satellite_mean - combined_soil_moisture,
        alert: classify_soil_moisture(combined_soil_moisture),
    }
}
