//! Inner-join alignment of benchmark and sector series, and timeframe resampling.

use crate::domain::error::RotagraphError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::settings::Timeframe;
use crate::domain::universe::{SkipReason, SkippedSector};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::HashMap;

/// A named sector and its fetched price series.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSeries {
    pub sector: String,
    pub series: PriceSeries,
}

impl SectorSeries {
    pub fn new(sector: impl Into<String>, series: PriceSeries) -> Self {
        Self {
            sector: sector.into(),
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorColumn {
    pub sector: String,
    pub symbol: String,
    pub closes: Vec<f64>,
}

/// Benchmark and sector closes on one shared, strictly increasing date index.
///
/// Every column has exactly `dates.len()` finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPriceTable {
    pub dates: Vec<NaiveDate>,
    pub benchmark_symbol: String,
    pub benchmark: Vec<f64>,
    pub sectors: Vec<SectorColumn>,
}

pub struct Alignment {
    pub table: AlignedPriceTable,
    pub skipped: Vec<SkippedSector>,
}

impl AlignedPriceTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn sector_names(&self) -> Vec<&str> {
        self.sectors.iter().map(|c| c.sector.as_str()).collect()
    }

    pub fn column(&self, sector: &str) -> Option<&SectorColumn> {
        self.sectors.iter().find(|c| c.sector == sector)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Split the table back into one series per column.
    pub fn to_series(&self) -> (PriceSeries, Vec<SectorSeries>) {
        let benchmark = column_series(&self.benchmark_symbol, &self.dates, &self.benchmark);
        let sectors = self
            .sectors
            .iter()
            .map(|c| SectorSeries::new(&c.sector, column_series(&c.symbol, &self.dates, &c.closes)))
            .collect();
        (benchmark, sectors)
    }
}

fn column_series(symbol: &str, dates: &[NaiveDate], closes: &[f64]) -> PriceSeries {
    let points = dates
        .iter()
        .zip(closes)
        .map(|(&date, &close)| PricePoint { date, close })
        .collect();
    PriceSeries::new(symbol, points)
}

/// Keep only the dates every available series has a close for.
///
/// An empty benchmark is fatal. An empty sector series is skipped with a
/// warning and does not constrain the join.
pub fn align(benchmark: &PriceSeries, sectors: &[SectorSeries]) -> Result<Alignment, RotagraphError> {
    if benchmark.is_empty() {
        return Err(RotagraphError::BenchmarkUnavailable {
            tried: vec![benchmark.symbol().to_string()],
        });
    }

    let mut skipped = Vec::new();
    let mut available: Vec<&SectorSeries> = Vec::with_capacity(sectors.len());
    for s in sectors {
        if s.series.is_empty() {
            tracing::warn!(sector = %s.sector, symbol = %s.series.symbol(), "skipping sector with no price data");
            skipped.push(SkippedSector {
                sector: s.sector.clone(),
                symbol: s.series.symbol().to_string(),
                reason: SkipReason::NoData,
            });
            continue;
        }
        available.push(s);
    }

    let lookups: Vec<HashMap<NaiveDate, f64>> = available
        .iter()
        .map(|s| s.series.points().iter().map(|p| (p.date, p.close)).collect())
        .collect();

    let mut dates = Vec::new();
    let mut bench_closes = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); available.len()];

    'rows: for point in benchmark.points() {
        let mut row = Vec::with_capacity(lookups.len());
        for lookup in &lookups {
            match lookup.get(&point.date) {
                Some(&close) if close.is_finite() => row.push(close),
                _ => continue 'rows,
            }
        }
        dates.push(point.date);
        bench_closes.push(point.close);
        for (col, close) in columns.iter_mut().zip(row) {
            col.push(close);
        }
    }

    let sectors = available
        .iter()
        .zip(columns)
        .map(|(s, closes)| SectorColumn {
            sector: s.sector.clone(),
            symbol: s.series.symbol().to_string(),
            closes,
        })
        .collect();

    tracing::debug!(rows = dates.len(), "aligned price table");

    Ok(Alignment {
        table: AlignedPriceTable {
            dates,
            benchmark_symbol: benchmark.symbol().to_string(),
            benchmark: bench_closes,
            sectors,
        },
        skipped,
    })
}

/// Collapse the table to the last observation of each week or month.
///
/// Weekly bins end on Friday and are labelled with that Friday; monthly bins
/// are labelled with the last calendar day of the month.
pub fn resample(table: &AlignedPriceTable, timeframe: Timeframe) -> AlignedPriceTable {
    let label: fn(NaiveDate) -> NaiveDate = match timeframe {
        Timeframe::Daily => return table.clone(),
        Timeframe::Weekly => week_ending_friday,
        Timeframe::Monthly => month_end,
    };

    // Rows past the shortest column are ignored.
    let rows = table
        .sectors
        .iter()
        .map(|c| c.closes.len())
        .fold(table.dates.len().min(table.benchmark.len()), usize::min);

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut picks: Vec<usize> = Vec::new();
    for (i, &date) in table.dates.iter().take(rows).enumerate() {
        let bin = label(date);
        if dates.last() == Some(&bin) {
            if let Some(last) = picks.last_mut() {
                *last = i;
            }
        } else {
            dates.push(bin);
            picks.push(i);
        }
    }

    AlignedPriceTable {
        dates,
        benchmark_symbol: table.benchmark_symbol.clone(),
        benchmark: picks.iter().map(|&i| table.benchmark[i]).collect(),
        sectors: table
            .sectors
            .iter()
            .map(|c| SectorColumn {
                sector: c.sector.clone(),
                symbol: c.symbol.clone(),
                closes: picks.iter().map(|&i| c.closes[i]).collect(),
            })
            .collect(),
    }
}

pub fn week_ending_friday(date: NaiveDate) -> NaiveDate {
    let today = date.weekday().num_days_from_monday();
    let friday = Weekday::Fri.num_days_from_monday();
    let ahead = (friday + 7 - today) % 7;
    date + Days::new(ahead as u64)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}
