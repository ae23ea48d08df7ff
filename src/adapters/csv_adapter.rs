//! CSV file data adapter.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with a header row naming at
//! least a `date` and a `close` column (case-insensitive, any order).

use crate::domain::error::RotagraphError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::domain::settings::Period;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Every usable row in the file, without period filtering.
    fn read_series(&self, symbol: &str) -> Result<PriceSeries, RotagraphError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| RotagraphError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| RotagraphError::Data {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?;

        let date_idx = column_index(headers, "date").ok_or_else(|| RotagraphError::Data {
            reason: format!("missing date column in {}", path.display()),
        })?;
        let close_idx = column_index(headers, "close").ok_or_else(|| RotagraphError::Data {
            reason: format!("missing close column in {}", path.display()),
        })?;

        let mut points = Vec::new();
        let mut gaps = 0usize;

        for result in rdr.records() {
            let record = result.map_err(|e| RotagraphError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_idx).unwrap_or("").trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                RotagraphError::Data {
                    reason: format!("invalid date '{}' in {}: {}", date_str, path.display(), e),
                }
            })?;

            // Provider gaps (blank, "null", "NaN") are dropped rather than rejected.
            let close = match record.get(close_idx).map(str::trim).map(str::parse::<f64>) {
                Some(Ok(close)) if close.is_finite() => close,
                _ => {
                    gaps += 1;
                    continue;
                }
            };

            points.push(PricePoint { date, close });
        }

        if gaps > 0 {
            tracing::debug!(symbol, gaps, "dropped rows without a usable close");
        }

        Ok(PriceSeries::new(symbol, points))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

impl DataPort for CsvAdapter {
    fn fetch_closes(&self, symbol: &str, period: Period) -> Result<PriceSeries, RotagraphError> {
        let series = self.read_series(symbol)?;
        match series.last_date() {
            Some(end) => Ok(series.since(period.start_from(end))),
            None => Ok(series),
        }
    }

    fn list_symbols(&self) -> Result<Vec<String>, RotagraphError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| RotagraphError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| RotagraphError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, RotagraphError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let series = self.read_series(symbol)?;
        Ok(match (series.first_date(), series.last_date()) {
            (Some(first), Some(last)) => Some((first, last, series.len())),
            _ => None,
        })
    }
}
