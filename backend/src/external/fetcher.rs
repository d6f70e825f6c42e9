//! Bounded-retry JSON fetcher
//!
//! Every provider call goes through [`ResilientFetcher::fetch`]: up to
//! `max_retries` immediate, strictly sequential attempts, the first HTTP 200
//! with a parseable JSON body wins. Exhaustion is reported as `None`, not as
//! an error; callers decide what absence means.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use serde_json::Value;
use shared::DEFAULT_MAX_RETRIES;
use thiserror::Error;

/// Query parameter that carries the provider credential
const CREDENTIAL_PARAM: &str = "api_key";

/// A single provider GET, immutable once built
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: Url,
    pub headers: HeaderMap,
    pub max_retries: u32,
}

impl FetchRequest {
    /// GET expecting a JSON body, with the default retry budget
    pub fn json(url: Url) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Self {
            url,
            headers,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// URL safe for logs, with the credential masked
    pub fn redacted_url(&self) -> String {
        if self.url.query().is_none() {
            return self.url.to_string();
        }

        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(key, value)| {
                let value = if key == CREDENTIAL_PARAM {
                    "***".to_string()
                } else {
                    value.into_owned()
                };
                (key.into_owned(), value)
            })
            .collect();

        let mut url = self.url.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

/// Raw response of one attempt
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Why a single attempt failed. Absorbed by the retry loop.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchFailure {
    #[error("unexpected status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid JSON body: {0}")]
    Decode(String),
}

/// Performs one HTTP GET
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, FetchFailure>;
}

/// Transport backed by a pooled `reqwest` client
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, FetchFailure> {
        let response = self
            .client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(e.without_url().to_string()))?;

        Ok(TransportResponse { status, body })
    }
}

/// Observability sink for the retry loop
pub trait FetchObserver: Send + Sync {
    fn attempt_failed(&self, request: &FetchRequest, attempt: u32, failure: &FetchFailure);

    fn succeeded(&self, _request: &FetchRequest, _attempt: u32) {}

    fn exhausted(&self, _request: &FetchRequest) {}
}

/// Default sink: structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn attempt_failed(&self, request: &FetchRequest, attempt: u32, failure: &FetchFailure) {
        tracing::warn!(
            url = %request.redacted_url(),
            attempt,
            max_retries = request.max_retries,
            error = %failure,
            "Provider request attempt failed"
        );
    }

    fn succeeded(&self, request: &FetchRequest, attempt: u32) {
        tracing::debug!(url = %request.redacted_url(), attempt, "Provider request succeeded");
    }

    fn exhausted(&self, request: &FetchRequest) {
        tracing::error!(
            url = %request.redacted_url(),
            max_retries = request.max_retries,
            "Provider request failed after all attempts"
        );
    }
}

/// Retrying JSON fetcher
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn HttpTransport>,
    observer: Arc<dyn FetchObserver>,
}

impl ResilientFetcher {
    /// Create a fetcher logging through `tracing`
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Fetch and parse `request`, or `None` once every attempt has failed
    pub async fn fetch(&self, request: &FetchRequest) -> Option<Value> {
        for attempt in 1..=request.max_retries {
            match self.attempt(request).await {
                Ok(value) => {
                    self.observer.succeeded(request, attempt);
                    return Some(value);
                }
                Err(failure) => self.observer.attempt_failed(request, attempt, &failure),
            }
        }

        self.observer.exhausted(request);
        None
    }

    async fn attempt(&self, request: &FetchRequest) -> Result<Value, FetchFailure> {
        let response = self.transport.get(request).await?;

        if response.status != 200 {
            return Err(FetchFailure::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| FetchFailure::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> FetchRequest {
        FetchRequest::json(Url::parse(url).unwrap())
    }

    #[test]
    fn json_request_defaults() {
        let req = request("https://example.test/a");
        assert_eq!(req.max_retries, 3);
        assert_eq!(req.headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn redacts_credential_only() {
        let req = request("https://example.test/a?api_key=secret&farm_id=f1");
        let redacted = req.redacted_url();
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("farm_id=f1"));
    }

    #[test]
    fn redaction_without_query_is_identity() {
        let req = request("https://example.test/a");
        assert_eq!(req.redacted_url(), "https://example.test/a");
    }
}
