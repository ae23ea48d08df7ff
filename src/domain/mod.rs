//! Core domain types and the rotation metrics engine.

pub mod price_series;
pub mod alignment;
pub mod rolling;
pub mod indicator;
pub mod rotation;
pub mod quadrant;
pub mod signal;
pub mod ranking;
pub mod settings;
pub mod universe;
pub mod config_validation;
pub mod error;
