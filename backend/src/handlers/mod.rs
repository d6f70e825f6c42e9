//! HTTP handlers

pub mod health;
pub mod irrigation;

pub use health::health_check;
pub use irrigation::get_irrigation_alert;
