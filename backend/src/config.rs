//! Configuration management for the irrigation alert service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with IRRIGATION_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{DEFAULT_MAX_RETRIES, SATELLITE_WINDOW_DAYS, WEATHER_WINDOW_DAYS};

use crate::external::mapmycrop::{
    DEFAULT_BASE_URL, DEFAULT_INDEX, DEFAULT_INTERVAL, DEFAULT_SATELLITE,
};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Agronomic data provider configuration
    pub provider: ProviderConfig,

    /// Evaluation windows and fetch ordering
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider API base URL
    pub base_url: String,

    /// Attempts per request before giving up
    pub max_retries: u32,

    /// Satellite index name
    pub index: String,

    /// Satellite identifier
    pub satellite: String,

    /// Statistics aggregation interval (ISO 8601 duration)
    pub interval: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Days of satellite statistics averaged
    pub satellite_window_days: u32,

    /// Days of soil moisture samples averaged
    pub weather_window_days: u32,

    /// Issue the satellite and weather requests concurrently
    pub concurrent_fetches: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("IRRIGATION_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("provider.base_url", DEFAULT_BASE_URL)?
            .set_default("provider.max_retries", i64::from(DEFAULT_MAX_RETRIES))?
            .set_default("provider.index", DEFAULT_INDEX)?
            .set_default("provider.satellite", DEFAULT_SATELLITE)?
            .set_default("provider.interval", DEFAULT_INTERVAL)?
            .set_default(
                "pipeline.satellite_window_days",
                i64::from(SATELLITE_WINDOW_DAYS),
            )?
            .set_default(
                "pipeline.weather_window_days",
                i64::from(WEATHER_WINDOW_DAYS),
            )?
            .set_default("pipeline.concurrent_fetches", false)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (IRRIGATION_ prefix)
            .add_source(
                Environment::with_prefix("IRRIGATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            index: DEFAULT_INDEX.to_string(),
            satellite: DEFAULT_SATELLITE.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            satellite_window_days: SATELLITE_WINDOW_DAYS,
            weather_window_days: WEATHER_WINDOW_DAYS,
            concurrent_fetches: false,
        }
    }
}
