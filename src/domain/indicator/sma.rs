//! Simple moving average of closes.
//!
//! Warmup: first `period - 1` points are undefined.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::price_series::PriceSeries;
use crate::domain::rolling::rolling_mean;

pub fn calculate_sma(series: &PriceSeries, period: usize) -> IndicatorSeries {
    let closes: Vec<Option<f64>> = series.points().iter().map(|p| Some(p.close)).collect();
    IndicatorSeries::from_values(
        IndicatorType::Sma(period),
        &series.dates(),
        rolling_mean(&closes, period),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_series::PricePoint;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            "TEST",
            closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    date: start + chrono::Duration::days(i as i64),
                    close,
                })
                .collect(),
        )
    }

    #[test]
    fn sma_warmup_then_values() {
        let series = calculate_sma(&make_series(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3);
        assert_eq!(series.len(), 5);
        assert_eq!(series.values[0].value, None);
        assert_eq!(series.values[1].value, None);
        assert_relative_eq!(series.values[2].value.unwrap(), 2.0);
        assert_relative_eq!(series.values[4].value.unwrap(), 4.0);
    }

    #[test]
    fn sma_indicator_type() {
        let series = calculate_sma(&make_series(&[1.0]), 20);
        assert_eq!(series.indicator_type, IndicatorType::Sma(20));
        assert_eq!(series.last(), None);
    }

    #[test]
    fn sma_empty_series() {
        let series = calculate_sma(&make_series(&[]), 20);
        assert!(series.is_empty());
    }
}
