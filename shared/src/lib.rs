//! Shared types and computations for the irrigation alert service
//!
//! Everything in this crate is free of I/O: data models for the provider
//! payloads, the two time-series reducers and the irrigation decision.

pub mod analysis;
pub mod error;
pub mod models;
pub mod types;

pub use analysis::*;
pub use error::*;
pub use models::*;
pub use types::*;
