//! Scripted transport and recording observer shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend::config::{PipelineConfig, ProviderConfig};
use backend::external::{
    FetchFailure, FetchObserver, FetchRequest, HttpTransport, MapMyCropClient, ResilientFetcher,
    TransportResponse,
};
use backend::IrrigationService;
use serde_json::{json, Value};

pub const SATELLITE_PATH: &str = "/satellite/statistics";
pub const WEATHER_PATH: &str = "/weather/historical";

pub type Outcome = Result<TransportResponse, FetchFailure>;

/// Transport answering from per-path queues and recording every request
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Outcome>>>,
    requests: Mutex<Vec<reqwest::Url>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue outcomes for a path; an exhausted queue yields transport errors
    pub fn script(&self, path: &str, outcomes: Vec<Outcome>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .extend(outcomes);
    }

    pub fn requests(&self) -> Vec<reqwest::Url> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| url.path() == path)
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, request: &FetchRequest) -> Result<TransportResponse, FetchFailure> {
        self.requests.lock().unwrap().push(request.url.clone());
        self.scripts
            .lock()
            .unwrap()
            .get_mut(request.url.path())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(FetchFailure::Transport("connection refused".to_string())))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Failed { attempt: u32, failure: FetchFailure },
    Succeeded { attempt: u32 },
    Exhausted,
}

/// Observer collecting retry-loop events
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<FetchEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<FetchEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn failures(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FetchEvent::Failed { .. }))
            .count()
    }
}

impl FetchObserver for RecordingObserver {
    fn attempt_failed(&self, _request: &FetchRequest, attempt: u32, failure: &FetchFailure) {
        self.events.lock().unwrap().push(FetchEvent::Failed {
            attempt,
            failure: failure.clone(),
        });
    }

    fn succeeded(&self, _request: &FetchRequest, attempt: u32) {
        self.events
            .lock()
            .unwrap()
            .push(FetchEvent::Succeeded { attempt });
    }

    fn exhausted(&self, _request: &FetchRequest) {
        self.events.lock().unwrap().push(FetchEvent::Exhausted);
    }
}

pub fn ok_json(value: Value) -> Outcome {
    Ok(TransportResponse::new(200, value.to_string()))
}

pub fn status(code: u16) -> Outcome {
    Ok(TransportResponse::new(code, "{\"detail\":\"error\"}"))
}

pub fn satellite_day(date: &str, mean: f64) -> Value {
    json!({
        "date": date,
        "outputs": { "data": { "bands": { "B0": { "stats": { "mean": mean, "min": 0.0, "max": 1.0 } } } } }
    })
}

pub fn fetcher(transport: Arc<ScriptedTransport>, observer: Arc<RecordingObserver>) -> ResilientFetcher {
    ResilientFetcher::new(transport).with_observer(observer)
}

/// Service wired to a scripted transport
pub fn service(transport: Arc<ScriptedTransport>, concurrent_fetches: bool) -> IrrigationService {
    let fetcher = fetcher(transport, RecordingObserver::new());
    let provider = ProviderConfig {
        base_url: "http://provider.test".to_string(),
        ..ProviderConfig::default()
    };
    let client = MapMyCropClient::from_config(fetcher, &provider);
    IrrigationService::new(
        client,
        PipelineConfig {
            concurrent_fetches,
            ..PipelineConfig::default()
        },
    )
}
