//! Daily entry signal for a single sector.
//!
//! YES when, at the latest daily close:
//! - close > SMA(20)
//! - RSI(14) > 55
//! - RSI(14) is higher than on the previous day
//!
//! Fewer than `MIN_OBSERVATIONS` closes is an uncommitted NO, not an error.

use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price_series::PriceSeries;
use crate::domain::quadrant::Quadrant;
use crate::domain::settings::Timeframe;
use std::fmt;

pub const SMA_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;
pub const RSI_THRESHOLD: f64 = 55.0;
pub const MIN_OBSERVATIONS: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyEntrySignal {
    Yes,
    No,
}

/// What the ranking table shows in its daily-entry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyEntry {
    Signal(DailyEntrySignal),
    /// Weekly view, but the sector is not Leading or Improving.
    NotEvaluated,
    /// Daily or monthly view.
    NotApplicable,
}

impl fmt::Display for DailyEntrySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyEntrySignal::Yes => write!(f, "YES"),
            DailyEntrySignal::No => write!(f, "NO"),
        }
    }
}

impl fmt::Display for DailyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyEntry::Signal(signal) => signal.fmt(f),
            DailyEntry::NotEvaluated => write!(f, "—"),
            DailyEntry::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl DailyEntry {
    pub fn is_yes(&self) -> bool {
        matches!(self, DailyEntry::Signal(DailyEntrySignal::Yes))
    }
}

pub fn daily_entry_signal(daily: &PriceSeries) -> DailyEntrySignal {
    if daily.len() < MIN_OBSERVATIONS {
        return DailyEntrySignal::No;
    }

    let sma = calculate_sma(daily, SMA_PERIOD);
    let rsi = calculate_rsi(daily, RSI_PERIOD);

    let (Some(close), Some(sma_now), Some(rsi_now), Some(rsi_prev)) = (
        daily.points().last().map(|p| p.close),
        sma.last(),
        rsi.last(),
        rsi.nth_back(1),
    ) else {
        return DailyEntrySignal::No;
    };

    if close > sma_now && rsi_now > RSI_THRESHOLD && rsi_now > rsi_prev {
        DailyEntrySignal::Yes
    } else {
        DailyEntrySignal::No
    }
}

/// Evaluate the signal only where it is meaningful: the weekly view, for
/// sectors in Leading or Improving. A missing daily series evaluates to NO.
pub fn gate_daily_entry(
    timeframe: Timeframe,
    quadrant: Quadrant,
    daily: Option<&PriceSeries>,
) -> DailyEntry {
    match (timeframe, quadrant) {
        (Timeframe::Weekly, Quadrant::Leading | Quadrant::Improving) => DailyEntry::Signal(
            daily.map_or(DailyEntrySignal::No, daily_entry_signal),
        ),
        (Timeframe::Weekly, _) => DailyEntry::NotEvaluated,
        _ => DailyEntry::NotApplicable,
    }
}
