//! HTTP handler for the irrigation alert endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::AggregateResult;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for the irrigation alert
#[derive(Debug, Deserialize, Validate)]
pub struct IrrigationAlertQuery {
    /// API key for the data provider
    #[validate(length(min = 1, message = "api_key must not be empty"))]
    pub api_key: String,

    /// Farm to evaluate
    #[validate(length(min = 1, message = "farm_id must not be empty"))]
    pub farm_id: String,
}

/// Evaluate whether a farm needs irrigation right now
pub async fn get_irrigation_alert(
    State(state): State<AppState>,
    query: Result<Query<IrrigationAlertQuery>, QueryRejection>,
) -> AppResult<Json<AggregateResult>> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let result = state
        .irrigation
        .evaluate(&query.api_key, &query.farm_id)
        .await?;
    Ok(Json(result))
}
