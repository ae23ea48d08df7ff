//! Run settings: timeframe, history period, analysis mode and window.

use chrono::{Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WINDOW: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    SixMonths,
    OneYear,
    TwoYears,
    ThreeYears,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    Swing,
    #[default]
    Positional,
}

/// Returned by the `FromStr` impls; carries the rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised {kind} '{value}'")]
pub struct ParseSettingError {
    pub kind: &'static str,
    pub value: String,
}

impl Period {
    pub fn months(&self) -> u32 {
        match self {
            Period::SixMonths => 6,
            Period::OneYear => 12,
            Period::TwoYears => 24,
            Period::ThreeYears => 36,
        }
    }

    /// First date covered when the history ends at `end`.
    pub fn start_from(&self, end: NaiveDate) -> NaiveDate {
        end.checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Mode {
    pub fn tail_length(&self) -> usize {
        match self {
            Mode::Swing => 5,
            Mode::Positional => 10,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::Daily => write!(f, "Daily"),
            Timeframe::Weekly => write!(f, "Weekly"),
            Timeframe::Monthly => write!(f, "Monthly"),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::SixMonths => write!(f, "6mo"),
            Period::OneYear => write!(f, "1y"),
            Period::TwoYears => write!(f, "2y"),
            Period::ThreeYears => write!(f, "3y"),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Swing => write!(f, "Swing"),
            Mode::Positional => write!(f, "Positional"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" => Ok(Timeframe::Daily),
            "weekly" | "w" => Ok(Timeframe::Weekly),
            "monthly" | "m" => Ok(Timeframe::Monthly),
            _ => Err(ParseSettingError {
                kind: "timeframe",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Period {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "6mo" => Ok(Period::SixMonths),
            "1y" => Ok(Period::OneYear),
            "2y" => Ok(Period::TwoYears),
            "3y" => Ok(Period::ThreeYears),
            _ => Err(ParseSettingError {
                kind: "period",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Mode {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "swing" => Ok(Mode::Swing),
            "positional" => Ok(Mode::Positional),
            _ => Err(ParseSettingError {
                kind: "mode",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationSettings {
    pub timeframe: Timeframe,
    /// History fetched for the rotation view.
    pub period: Period,
    /// History fetched for the daily entry signal.
    pub daily_period: Period,
    pub mode: Mode,
    pub window: usize,
}

impl RotationSettings {
    pub fn tail_length(&self) -> usize {
        self.mode.tail_length()
    }
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Weekly,
            period: Period::TwoYears,
            daily_period: Period::SixMonths,
            mode: Mode::Positional,
            window: DEFAULT_WINDOW,
        }
    }
}
