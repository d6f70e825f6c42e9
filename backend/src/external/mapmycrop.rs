//! MapMyCrop agronomic data API client
//!
//! Two endpoints are used: daily satellite index statistics for a farm and
//! historical weather (including soil moisture series) for a farm.

use reqwest::Url;
use serde_json::Value;
use shared::{DateWindow, DEFAULT_MAX_RETRIES};

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};
use crate::external::fetcher::{FetchRequest, ResilientFetcher};

pub const DEFAULT_BASE_URL: &str = "https://api.mapmycrop.com";
pub const DEFAULT_INDEX: &str = "Water Watch Map";
pub const DEFAULT_SATELLITE: &str = "S1";
/// ISO 8601 duration: one statistic per day
pub const DEFAULT_INTERVAL: &str = "P1D";

/// Which satellite product the statistics query asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteProduct {
    pub index: String,
    pub satellite: String,
    pub interval: String,
}

impl Default for SatelliteProduct {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_string(),
            satellite: DEFAULT_SATELLITE.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }
}

/// MapMyCrop API client
#[derive(Clone)]
pub struct MapMyCropClient {
    fetcher: ResilientFetcher,
    base_url: String,
    max_retries: u32,
    product: SatelliteProduct,
}

impl MapMyCropClient {
    /// Create a new client against the public API
    pub fn new(fetcher: ResilientFetcher) -> Self {
        Self::with_base_url(fetcher, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(fetcher: ResilientFetcher, base_url: String) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            product: SatelliteProduct::default(),
        }
    }

    /// Create a client from the `[provider]` configuration section
    pub fn from_config(fetcher: ResilientFetcher, config: &ProviderConfig) -> Self {
        Self::with_base_url(fetcher, config.base_url.clone())
            .with_max_retries(config.max_retries)
            .with_product(SatelliteProduct {
                index: config.index.clone(),
                satellite: config.satellite.clone(),
                interval: config.interval.clone(),
            })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_product(mut self, product: SatelliteProduct) -> Self {
        self.product = product;
        self
    }

    /// Build the daily satellite statistics request
    pub fn satellite_statistics_request(
        &self,
        credential: &str,
        farm_id: &str,
        window: &DateWindow,
    ) -> AppResult<FetchRequest> {
        let start = window.start_param();
        let end = window.end_param();
        let params = [
            ("api_key", credential),
            ("farm_id", farm_id),
            ("start_date", start.as_str()),
            ("end_date", end.as_str()),
            ("index", self.product.index.as_str()),
            ("satellite", self.product.satellite.as_str()),
            ("interval", self.product.interval.as_str()),
        ];
        self.request("satellite/statistics", &params)
    }

    /// Build the historical weather request
    pub fn historical_weather_request(
        &self,
        credential: &str,
        farm_id: &str,
        window: &DateWindow,
    ) -> AppResult<FetchRequest> {
        let start = window.start_param();
        let end = window.end_param();
        let params = [
            ("api_key", credential),
            ("farm_id", farm_id),
            ("start", start.as_str()),
            ("end", end.as_str()),
        ];
        self.request("weather/historical", &params)
    }

    /// Fetch daily satellite statistics; `None` when the provider never answered
    pub async fn satellite_statistics(
        &self,
        credential: &str,
        farm_id: &str,
        window: &DateWindow,
    ) -> AppResult<Option<Value>> {
        let request = self.satellite_statistics_request(credential, farm_id, window)?;
        Ok(self.fetcher.fetch(&request).await)
    }

    /// Fetch historical weather; `None` when the provider never answered
    pub async fn historical_weather(
        &self,
        credential: &str,
        farm_id: &str,
        window: &DateWindow,
    ) -> AppResult<Option<Value>> {
        let request = self.historical_weather_request(credential, farm_id, window)?;
        Ok(self.fetcher.fetch(&request).await)
    }

    fn request(&self, path: &str, params: &[(&str, &str)]) -> AppResult<FetchRequest> {
        let url = Url::parse_with_params(&format!("{}/{}", self.base_url, path), params)
            .map_err(|e| {
                AppError::Configuration(format!("Invalid provider URL {}: {}", self.base_url, e))
            })?;
        Ok(FetchRequest::json(url).with_max_retries(self.max_retries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::fetcher::ReqwestTransport;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn client(base: &str) -> MapMyCropClient {
        let fetcher = ResilientFetcher::new(Arc::new(ReqwestTransport::new()));
        MapMyCropClient::with_base_url(fetcher, base.to_string())
    }

    fn window() -> DateWindow {
        DateWindow::trailing(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(), 7)
    }

    fn params(request: &FetchRequest) -> HashMap<String, String> {
        request.url.query_pairs().into_owned().collect()
    }

    #[test]
    fn satellite_request_carries_product_and_window() {
        let request = client("https://api.example.test/")
            .satellite_statistics_request("key", "farm-1", &window())
            .unwrap();

        assert_eq!(request.url.path(), "/satellite/statistics");
        let params = params(&request);
        assert_eq!(params["api_key"], "key");
        assert_eq!(params["farm_id"], "farm-1");
        assert_eq!(params["start_date"], "2024-05-24");
        assert_eq!(params["end_date"], "2024-05-31");
        assert_eq!(params["index"], "Water Watch Map");
        assert_eq!(params["satellite"], "S1");
        assert_eq!(params["interval"], "P1D");
    }

    #[test]
    fn weather_request_uses_short_date_names() {
        let request = client(DEFAULT_BASE_URL)
            .with_max_retries(5)
            .historical_weather_request("key", "farm 7", &window())
            .unwrap();

        assert_eq!(request.url.path(), "/weather/historical");
        assert_eq!(request.max_retries, 5);
        let params = params(&request);
        assert_eq!(params["farm_id"], "farm 7");
        assert_eq!(params["start"], "2024-05-24");
        assert_eq!(params["end"], "2024-05-31");
    }

    #[test]
    fn invalid_base_url_is_a_configuration_error() {
        let err = client("not a url")
            .historical_weather_request("key", "farm", &window())
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
