//! Relative strength and rotation coordinates (RS-Ratio, RS-Momentum).
//!
//! For a sector price P_s and benchmark price P_b on the aligned index:
//!
//! RS          = P_s / P_b
//! RS-Ratio    = 100 * RS / mean(RS over the trailing window)
//! RS-Momentum = 100 * RS-Ratio / mean(RS-Ratio over the trailing window)
//!
//! RS-Ratio is defined from index `window - 1`, RS-Momentum from
//! `2 * window - 2`. Zero or non-finite denominators leave the point undefined.

use crate::domain::alignment::AlignedPriceTable;
use crate::domain::indicator::{IndicatorSeries, IndicatorType};
use crate::domain::rolling::{rolling_mean, safe_ratio};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPoint {
    pub date: NaiveDate,
    pub rs_ratio: f64,
    pub rs_momentum: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationLine {
    pub sector: String,
    pub ratio: IndicatorSeries,
    pub momentum: IndicatorSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RotationSeries {
    pub window: usize,
    pub dates: Vec<NaiveDate>,
    pub lines: Vec<RotationLine>,
}

impl RotationLine {
    fn point_at(&self, i: usize) -> Option<RotationPoint> {
        let ratio = self.ratio.values.get(i)?;
        let momentum = self.momentum.values.get(i)?;
        Some(RotationPoint {
            date: ratio.date,
            rs_ratio: ratio.value?,
            rs_momentum: momentum.value?,
        })
    }

    /// The pair at the most recent row, or `None` if either half is undefined there.
    pub fn latest(&self) -> Option<RotationPoint> {
        let last = self.ratio.len().checked_sub(1)?;
        self.point_at(last)
    }

    /// Defined pairs among the last `n` rows, oldest first.
    pub fn trail(&self, n: usize) -> Vec<RotationPoint> {
        let len = self.ratio.len();
        (len.saturating_sub(n)..len)
            .filter_map(|i| self.point_at(i))
            .collect()
    }
}

impl RotationSeries {
    pub fn line(&self, sector: &str) -> Option<&RotationLine> {
        self.lines.iter().find(|l| l.sector == sector)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// Sector close divided by benchmark close, per row.
pub fn relative_strength(table: &AlignedPriceTable) -> Vec<(String, Vec<Option<f64>>)> {
    table
        .sectors
        .iter()
        .map(|col| {
            let rs = col
                .closes
                .iter()
                .zip(&table.benchmark)
                .map(|(&sector, &bench)| safe_ratio(sector, bench))
                .collect();
            (col.sector.clone(), rs)
        })
        .collect()
}

/// `100 * value / trailing mean(value)` for each row.
fn normalise(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .zip(rolling_mean(values, window))
        .map(|(&v, mean)| safe_ratio(100.0 * v?, mean?))
        .collect()
}

pub fn compute_rotation(table: &AlignedPriceTable, window: usize) -> RotationSeries {
    let lines = relative_strength(table)
        .into_iter()
        .map(|(sector, rs)| {
            let ratio = normalise(&rs, window);
            let momentum = normalise(&ratio, window);
            RotationLine {
                sector,
                ratio: IndicatorSeries::from_values(IndicatorType::RsRatio(window), &table.dates, ratio),
                momentum: IndicatorSeries::from_values(
                    IndicatorType::RsMomentum(window),
                    &table.dates,
                    momentum,
                ),
            }
        })
        .collect();

    RotationSeries {
        window,
        dates: table.dates.clone(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alignment::SectorColumn;
    use crate::domain::settings::DEFAULT_WINDOW;
    use approx::assert_relative_eq;

    fn table(benchmark: Vec<f64>, sectors: Vec<(&str, Vec<f64>)>) -> AlignedPriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..benchmark.len())
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect();
        AlignedPriceTable {
            dates,
            benchmark_symbol: "BENCH".into(),
            benchmark,
            sectors: sectors
                .into_iter()
                .map(|(name, closes)| SectorColumn {
                    sector: name.into(),
                    symbol: name.to_uppercase(),
                    closes,
                })
                .collect(),
        }
    }

    fn trending(n: usize, start: f64, step: f64) -> Vec<f64> {
        (0..n).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn relative_strength_is_price_ratio() {
        let t = table(vec![10.0, 20.0, 0.0], vec![("IT", vec![5.0, 5.0, 5.0])]);
        let rs = relative_strength(&t);
        assert_eq!(rs[0].0, "IT");
        assert_eq!(rs[0].1, vec![Some(0.5), Some(0.25), None]);
    }

    #[test]
    fn warmup_boundaries() {
        let t = table(trending(40, 100.0, 1.0), vec![("IT", trending(40, 50.0, 0.7))]);
        let rotation = compute_rotation(&t, DEFAULT_WINDOW);
        let line = &rotation.lines[0];

        assert_eq!(line.ratio.first_valid_index(), Some(13));
        assert_eq!(line.momentum.first_valid_index(), Some(26));
        assert_eq!(line.ratio.len(), 40);
        assert_eq!(line.momentum.len(), 40);
    }

    #[test]
    fn too_short_history_has_no_latest() {
        let t = table(trending(26, 100.0, 1.0), vec![("IT", trending(26, 50.0, 1.0))]);
        let rotation = compute_rotation(&t, DEFAULT_WINDOW);
        assert!(rotation.lines[0].latest().is_none());
        assert!(rotation.lines[0].trail(10).is_empty());
    }

    #[test]
    fn constant_ratio_converges_to_100() {
        let bench = trending(40, 100.0, 1.5);
        let sector: Vec<f64> = bench.iter().map(|b| b * 2.0).collect();
        let rotation = compute_rotation(&table(bench, vec![("IT", sector)]), DEFAULT_WINDOW);

        let latest = rotation.lines[0].latest().unwrap();
        assert_eq!(latest.rs_ratio, 100.0);
        assert_eq!(latest.rs_momentum, 100.0);
    }

    #[test]
    fn outperforming_sector_has_ratio_above_100() {
        let bench = vec![100.0; 40];
        let sector = trending(40, 100.0, 2.0);
        let rotation = compute_rotation(&table(bench, vec![("IT", sector)]), DEFAULT_WINDOW);

        let latest = rotation.lines[0].latest().unwrap();
        assert!(latest.rs_ratio > 100.0);
    }

    #[test]
    fn ratio_matches_hand_computation() {
        let bench = vec![100.0; 5];
        let sector = vec![100.0, 102.0, 104.0, 106.0, 108.0];
        let rotation = compute_rotation(&table(bench, vec![("IT", sector)]), 3);
        let line = &rotation.lines[0];

        // RS at index 4 is 1.08, trailing mean of (1.04, 1.06, 1.08) is 1.06.
        assert_relative_eq!(line.ratio.last().unwrap(), 100.0 * 1.08 / 1.06, epsilon = 1e-9);
        let r2 = 100.0 * 1.04 / 1.02;
        let r3 = 100.0 * 1.06 / 1.04;
        let r4 = 100.0 * 1.08 / 1.06;
        let expected = 100.0 * r4 / ((r2 + r3 + r4) / 3.0);
        assert_relative_eq!(line.momentum.last().unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn trail_returns_last_defined_points_oldest_first() {
        let t = table(trending(40, 100.0, 1.0), vec![("IT", trending(40, 50.0, 0.9))]);
        let rotation = compute_rotation(&t, DEFAULT_WINDOW);
        let trail = rotation.lines[0].trail(5);

        assert_eq!(trail.len(), 5);
        assert_eq!(trail[4].date, *rotation.dates.last().unwrap());
        assert!(trail.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn trail_clips_to_defined_region() {
        let t = table(trending(30, 100.0, 1.0), vec![("IT", trending(30, 50.0, 0.9))]);
        let rotation = compute_rotation(&t, DEFAULT_WINDOW);
        // Momentum is defined from index 26, so only 4 of the last 10 rows qualify.
        assert_eq!(rotation.lines[0].trail(10).len(), 4);
    }

    #[test]
    fn line_lookup_by_sector() {
        let t = table(
            trending(30, 100.0, 1.0),
            vec![("IT", trending(30, 50.0, 1.0)), ("Bank", trending(30, 80.0, 1.0))],
        );
        let rotation = compute_rotation(&t, DEFAULT_WINDOW);
        assert!(rotation.line("Bank").is_some());
        assert!(rotation.line("Auto").is_none());
        assert_eq!(rotation.last_date(), t.dates.last().copied());
    }
}
