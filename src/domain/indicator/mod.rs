//! Indicator series used by the rotation view and the daily entry signal.
//!
//! - `IndicatorPoint`: one dated value, `None` while undefined (warm-up or a
//!   degenerate denominator)
//! - `IndicatorType`: indicator identity + window
//! - `IndicatorSeries`: a dated series of points

pub mod rsi;
pub mod sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
    RsRatio(usize),
    RsMomentum(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn from_values(
        indicator_type: IndicatorType,
        dates: &[NaiveDate],
        values: Vec<Option<f64>>,
    ) -> Self {
        let values = dates
            .iter()
            .zip(values)
            .map(|(&date, value)| IndicatorPoint { date, value })
            .collect();
        Self {
            indicator_type,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the final position, if defined.
    pub fn last(&self) -> Option<f64> {
        self.values.last().and_then(|p| p.value)
    }

    /// Value `n` positions before the final one, if defined.
    pub fn nth_back(&self, n: usize) -> Option<f64> {
        self.values.iter().rev().nth(n).and_then(|p| p.value)
    }

    /// Index of the first defined value.
    pub fn first_valid_index(&self) -> Option<usize> {
        self.values.iter().position(|p| p.value.is_some())
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::RsRatio(window) => write!(f, "RS-Ratio({})", window),
            IndicatorType::RsMomentum(window) => write!(f, "RS-Momentum({})", window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(n: u32) -> Vec<NaiveDate> {
        (1..=n)
            .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
            .collect()
    }

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
        assert_eq!(IndicatorType::Rsi(14).to_string(), "RSI(14)");
        assert_eq!(IndicatorType::RsRatio(14).to_string(), "RS-Ratio(14)");
        assert_eq!(IndicatorType::RsMomentum(14).to_string(), "RS-Momentum(14)");
    }

    #[test]
    fn last_and_nth_back() {
        let series = IndicatorSeries::from_values(
            IndicatorType::Rsi(14),
            &dates(4),
            vec![None, Some(1.0), Some(2.0), Some(3.0)],
        );
        assert_eq!(series.last(), Some(3.0));
        assert_eq!(series.nth_back(1), Some(2.0));
        assert_eq!(series.nth_back(3), None);
        assert_eq!(series.nth_back(10), None);
        assert_eq!(series.first_valid_index(), Some(1));
    }

    #[test]
    fn empty_series() {
        let series = IndicatorSeries::from_values(IndicatorType::Sma(20), &[], vec![]);
        assert!(series.is_empty());
        assert_eq!(series.last(), None);
        assert_eq!(series.first_valid_index(), None);
    }
}
