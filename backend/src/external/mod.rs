//! External API integrations

pub mod fetcher;
pub mod mapmycrop;

pub use fetcher::{
    FetchFailure, FetchObserver, FetchRequest, HttpTransport, ReqwestTransport, ResilientFetcher,
    TracingObserver, TransportResponse,
};
pub use mapmycrop::{MapMyCropClient, SatelliteProduct};
