//! Configuration validation.
//!
//! Validates every recognised key before a run so that a bad value is
//! reported with its section and key rather than surfacing mid-pipeline.

use crate::domain::error::RotagraphError;
use crate::domain::settings::{Mode, Period, Timeframe};
use crate::domain::universe::parse_pairs;
use crate::ports::config_port::ConfigPort;
use std::str::FromStr;

pub const MIN_WINDOW: i64 = 2;
pub const MAX_WINDOW: i64 = 250;

/// Reason attached to an out-of-range `[rotation] window`.
pub fn window_range_reason() -> String {
    format!(
        "window must be an integer between {} and {}",
        MIN_WINDOW, MAX_WINDOW
    )
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), RotagraphError> {
    validate_data_dir(config)?;
    validate_parsed::<Period>(config, "data", "daily_period")?;
    validate_parsed::<Timeframe>(config, "rotation", "timeframe")?;
    validate_parsed::<Period>(config, "rotation", "period")?;
    validate_parsed::<Mode>(config, "rotation", "mode")?;
    validate_window(config)?;
    validate_instruments(config, "benchmarks")?;
    validate_instruments(config, "sectors")?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), RotagraphError> {
    match config.get_string("data", "dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(RotagraphError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

/// Optional key: absent is fine, present must parse.
fn validate_parsed<T>(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), RotagraphError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(value) = config.get_string(section, key) {
        value
            .parse::<T>()
            .map_err(|e| RotagraphError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })?;
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), RotagraphError> {
    let Some(raw) = config.get_string("rotation", "window") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(w) if (MIN_WINDOW..=MAX_WINDOW).contains(&w) => Ok(()),
        _ => Err(RotagraphError::ConfigInvalid {
            section: "rotation".to_string(),
            key: "window".to_string(),
            reason: window_range_reason(),
        }),
    }
}

fn validate_instruments(config: &dyn ConfigPort, key: &str) -> Result<(), RotagraphError> {
    if let Some(value) = config.get_string("universe", key) {
        parse_pairs(&value).map_err(|e| RotagraphError::ConfigInvalid {
            section: "universe".to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}
