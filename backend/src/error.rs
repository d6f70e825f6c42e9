//! Error handling for the irrigation alert service
//!
//! Pipeline failures are classified into "not found" and "server error"
//! responses; each carries a machine code plus a human-readable detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ReductionError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Pipeline errors
    #[error("No satellite data found for the given parameters")]
    NoSatelliteData,

    #[error("Historical weather data unavailable: {0}")]
    WeatherDataUnavailable(String),

    #[error("Insufficient soil moisture data: {0}")]
    InsufficientSoilData(String),

    /// Upstream payload does not match the documented layout
    #[error("Malformed provider data: {0}")]
    UpstreamDataShape(String),

    // Request errors
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<ReductionError> for AppError {
    fn from(err: ReductionError) -> Self {
        match err {
            ReductionError::MissingSeries(series) => {
                AppError::WeatherDataUnavailable(format!("missing series '{}'", series))
            }
            ReductionError::InsufficientData { series } => {
                AppError::InsufficientSoilData(format!("no samples in {}", series.join(", ")))
            }
            shape @ ReductionError::DataShape { .. } => {
                AppError::UpstreamDataShape(shape.to_string())
            }
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NoSatelliteData => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::WeatherDataUnavailable(_)
            | AppError::InsufficientSoilData(_)
            | AppError::UpstreamDataShape(_)
            | AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> ErrorDetail {
        let (code, message, detail) = match self {
            AppError::NoSatelliteData => (
                "NO_SATELLITE_DATA",
                "No satellite data found for the given parameters.".to_string(),
                None,
            ),
            AppError::WeatherDataUnavailable(detail) => (
                "WEATHER_DATA_UNAVAILABLE",
                "Failed to retrieve historical weather data or missing soil moisture data."
                    .to_string(),
                Some(detail.clone()),
            ),
            AppError::InsufficientSoilData(detail) => (
                "INSUFFICIENT_SOIL_DATA",
                "Insufficient soil moisture data.".to_string(),
                Some(detail.clone()),
            ),
            AppError::UpstreamDataShape(detail) => (
                "UPSTREAM_DATA_SHAPE",
                "The data provider returned an unexpected payload.".to_string(),
                Some(detail.clone()),
            ),
            AppError::ValidationError(msg) => ("VALIDATION_ERROR", msg.clone(), None),
            AppError::Configuration(msg) => (
                "CONFIGURATION_ERROR",
                format!("Configuration error: {}", msg),
                None,
            ),
        };

        ErrorDetail {
            code: code.to_string(),
            message,
            detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
