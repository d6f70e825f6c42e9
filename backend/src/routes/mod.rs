//! Route definitions for the irrigation alert service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/Irrigation/Alert", get(handlers::get_irrigation_alert))
}
