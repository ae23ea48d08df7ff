#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, Weekday};
use rotagraph::domain::error::RotagraphError;
use rotagraph::domain::price_series::{PricePoint, PriceSeries};
use rotagraph::domain::settings::Period;
use rotagraph::domain::universe::{parse_pairs, Universe};
use rotagraph::ports::data_port::DataPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, PriceSeries>,
    pub errors: HashMap<String, String>,
    pub calls: RefCell<Vec<(String, Period)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_series(mut self, series: PriceSeries) -> Self {
        self.data.insert(series.symbol().to_string(), series);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    /// Symbols fetched with the given period, in call order.
    pub fn fetched_with(&self, period: Period) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|(_, p)| *p == period)
            .map(|(s, _)| s.clone())
            .collect()
    }
}

impl DataPort for MockDataPort {
    fn fetch_closes(&self, symbol: &str, period: Period) -> Result<PriceSeries, RotagraphError> {
        self.calls.borrow_mut().push((symbol.to_string(), period));
        if let Some(reason) = self.errors.get(symbol) {
            return Err(RotagraphError::Data {
                reason: reason.clone(),
            });
        }
        Ok(match self.data.get(symbol) {
            Some(series) => match series.last_date() {
                Some(end) => series.since(period.start_from(end)),
                None => series.clone(),
            },
            None => PriceSeries::empty(symbol),
        })
    }

    fn list_symbols(&self) -> Result<Vec<String>, RotagraphError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotagraphError> {
        Ok(self.data.get(symbol).and_then(|s| {
            Some((s.first_date()?, s.last_date()?, s.len()))
        }))
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// `n` consecutive weekdays starting at `start` (skipped forward if it is a weekend).
pub fn weekdays(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(n);
    let mut d = start;
    while dates.len() < n {
        if !matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            dates.push(d);
        }
        d = d.succ_opt().unwrap();
    }
    dates
}

pub fn series(symbol: &str, dates: &[NaiveDate], closes: &[f64]) -> PriceSeries {
    assert_eq!(dates.len(), closes.len());
    PriceSeries::new(
        symbol,
        dates
            .iter()
            .zip(closes)
            .map(|(&date, &close)| PricePoint { date, close })
            .collect(),
    )
}

/// Benchmark closes rising by 0.1 per day from 100.
pub fn benchmark_closes(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + 0.1 * i as f64).collect()
}

/// A sector that is always exactly `factor` times the benchmark.
pub fn scaled(closes: &[f64], factor: f64) -> Vec<f64> {
    closes.iter().map(|c| c * factor).collect()
}

pub fn universe(benchmarks: &str, sectors: &str) -> Universe {
    Universe {
        benchmarks: parse_pairs(benchmarks).unwrap(),
        sectors: parse_pairs(sectors).unwrap(),
    }
}

/// Render a series as the CSV layout the file adapter reads.
pub fn to_csv(series: &PriceSeries) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for p in series.points() {
        out.push_str(&format!(
            "{},{:.4},{:.4},{:.4},{:.4},1000\n",
            p.date, p.close, p.close, p.close, p.close
        ));
    }
    out
}
