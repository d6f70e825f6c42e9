//! Domain models for the irrigation alert service

mod irrigation;
mod satellite;
mod weather;

pub use irrigation::*;
pub use satellite::*;
pub use weather::*;
