//! Business logic services for the irrigation alert service

pub mod irrigation;

pub use irrigation::IrrigationService;
