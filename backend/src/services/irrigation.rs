//! Irrigation evaluation pipeline
//!
//! Fetches 90 days of satellite water-index statistics and 7 days of soil
//! moisture history for a farm, reduces both to averages and classifies the
//! current irrigation need. Nothing is cached between evaluations.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use shared::{
    decide, reduce_satellite, reduce_soil_moisture, AggregateResult, DateWindow,
    HistoricalWeatherResponse, SoilMoistureSummary,
};

use crate::config::{Config, PipelineConfig};
use crate::error::{AppError, AppResult};
use crate::external::{MapMyCropClient, ReqwestTransport, ResilientFetcher};

/// Irrigation service evaluating one farm per call
#[derive(Clone)]
pub struct IrrigationService {
    client: MapMyCropClient,
    settings: PipelineConfig,
}

impl IrrigationService {
    /// Create a new IrrigationService instance
    pub fn new(client: MapMyCropClient, settings: PipelineConfig) -> Self {
        Self { client, settings }
    }

    /// Create a service talking to the configured provider over HTTP
    pub fn from_config(config: &Config) -> Self {
        let fetcher = ResilientFetcher::new(Arc::new(ReqwestTransport::new()));
        let client = MapMyCropClient::from_config(fetcher, &config.provider);
        Self::new(client, config.pipeline.clone())
    }

    /// Evaluate irrigation need as of today (UTC)
    pub async fn evaluate(&self, credential: &str, farm_id: &str) -> AppResult<AggregateResult> {
        self.evaluate_on(credential, farm_id, Utc::now().date_naive())
            .await
    }

    /// Evaluate irrigation need with windows ending on `today`
    #[tracing::instrument(skip(self, credential), fields(concurrent = self.settings.concurrent_fetches))]
    pub async fn evaluate_on(
        &self,
        credential: &str,
        farm_id: &str,
        today: NaiveDate,
    ) -> AppResult<AggregateResult> {
        let satellite_window = DateWindow::trailing(today, self.settings.satellite_window_days);
        let weather_window = DateWindow::trailing(today, self.settings.weather_window_days);

        let (satellite_mean, weather_payload) = if self.settings.concurrent_fetches {
            let (satellite, weather) = tokio::join!(
                self.client
                    .satellite_statistics(credential, farm_id, &satellite_window),
                self.client
                    .historical_weather(credential, farm_id, &weather_window),
            );
            (satellite_mean_from(satellite?)?, weather?)
        } else {
            let satellite = self
                .client
                .satellite_statistics(credential, farm_id, &satellite_window)
                .await?;
            let satellite_mean = satellite_mean_from(satellite)?;
            let weather = self
                .client
                .historical_weather(credential, farm_id, &weather_window)
                .await?;
            (satellite_mean, weather)
        };

        let soil = soil_moisture_from(weather_payload)?;
        let decision = decide(satellite_mean, soil.combined);

        tracing::info!(
            satellite_mean,
            soil_moisture = soil.combined,
            value_of_c = decision.composite_signal,
            alert = %decision.alert,
            "Irrigation evaluated"
        );

        Ok(AggregateResult::assemble(
            satellite_mean,
            satellite_window.start,
            satellite_window.end,
            soil,
            decision,
        ))
    }
}

/// Reduce the satellite payload; an absent or empty payload means no data
fn satellite_mean_from(payload: Option<Value>) -> AppResult<f64> {
    match payload {
        None | Some(Value::Null) => Err(AppError::NoSatelliteData),
        Some(Value::Array(records)) if records.is_empty() => Err(AppError::NoSatelliteData),
        Some(Value::Object(fields)) if fields.is_empty() => Err(AppError::NoSatelliteData),
        Some(Value::Array(records)) => {
            tracing::debug!(days = records.len(), "Reducing satellite statistics");
            Ok(reduce_satellite(&records)?)
        }
        Some(other) => Err(AppError::UpstreamDataShape(format!(
            "satellite statistics is not a list: {}",
            json_kind(&other)
        ))),
    }
}

fn soil_moisture_from(payload: Option<Value>) -> AppResult<SoilMoistureSummary> {
    let payload = payload.ok_or_else(|| {
        AppError::WeatherDataUnavailable("provider did not return historical weather".to_string())
    })?;
    let response = HistoricalWeatherResponse::from_json(payload);
    Ok(reduce_soil_moisture(&response)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_satellite_list_is_no_data() {
        assert!(matches!(
            satellite_mean_from(Some(json!([]))),
            Err(AppError::NoSatelliteData)
        ));
        assert!(matches!(satellite_mean_from(None), Err(AppError::NoSatelliteData)));
    }

    #[test]
    fn empty_satellite_object_is_no_data() {
        assert!(matches!(
            satellite_mean_from(Some(json!({}))),
            Err(AppError::NoSatelliteData)
        ));
    }

    #[test]
    fn satellite_object_is_a_shape_error() {
        assert!(matches!(
            satellite_mean_from(Some(json!({ "detail": "oops" }))),
            Err(AppError::UpstreamDataShape(_))
        ));
    }

    #[test]
    fn absent_weather_is_unavailable() {
        assert!(matches!(
            soil_moisture_from(None),
            Err(AppError::WeatherDataUnavailable(_))
        ));
    }
}
