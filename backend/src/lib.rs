//! Irrigation alert service
//!
//! Answers "is irrigation needed right now?" for a farm by combining
//! satellite water-index statistics with ground soil moisture readings
//! fetched from the MapMyCrop API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::IrrigationService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub irrigation: IrrigationService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let irrigation = IrrigationService::from_config(&config);
        Self {
            config: Arc::new(config),
            irrigation,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Irrigation Alert API v1.0"
}
