//! Benchmark and sector universe.
//!
//! Parses `Name:SYMBOL` lists from configuration, picks the first benchmark
//! candidate with data, and loads sector series while tolerating per-sector
//! failures.

use crate::domain::alignment::SectorSeries;
use crate::domain::error::RotagraphError;
use crate::domain::price_series::PriceSeries;
use crate::domain::settings::Period;
use crate::ports::data_port::DataPort;
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_BENCHMARKS: &str =
    "NIFTY 50 (ETF):NIFTYBEES.NS, NIFTY 50 (Index):^NSEI, Bank Nifty (ETF):BANKBEES.NS";

pub const DEFAULT_SECTORS: &str = "Bank:^NSEBANK, IT:^CNXIT, FMCG:^CNXFMCG, Auto:^CNXAUTO, \
    Pharma:^CNXPHARMA, Metal:^CNXMETAL, Energy:^CNXENERGY";

/// A display name paired with the symbol the data port knows it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone)]
pub struct Universe {
    pub benchmarks: Vec<Instrument>,
    pub sectors: Vec<Instrument>,
}

impl Universe {
    pub fn sector(&self, name: &str) -> Option<&Instrument> {
        self.sectors
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty entry in instrument list")]
    EmptyToken,

    #[error("missing symbol for '{0}' (expected Name:SYMBOL)")]
    MissingSymbol(String),

    #[error("duplicate name: {0}")]
    DuplicateName(String),

    #[error("instrument list is empty")]
    Empty,
}

/// Parse `Name:SYMBOL, Name:SYMBOL, ...`, preserving order.
pub fn parse_pairs(input: &str) -> Result<Vec<Instrument>, UniverseError> {
    if input.trim().is_empty() {
        return Err(UniverseError::Empty);
    }

    let mut instruments = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let (name, symbol) = trimmed
            .split_once(':')
            .map(|(n, s)| (n.trim(), s.trim()))
            .filter(|(n, s)| !n.is_empty() && !s.is_empty())
            .ok_or_else(|| UniverseError::MissingSymbol(trimmed.to_string()))?;

        if !seen.insert(name.to_lowercase()) {
            return Err(UniverseError::DuplicateName(name.to_string()));
        }
        instruments.push(Instrument {
            name: name.to_string(),
            symbol: symbol.to_string(),
        });
    }

    Ok(instruments)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSector {
    pub sector: String,
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    FetchFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data"),
            SkipReason::FetchFailed(reason) => write!(f, "fetch failed: {}", reason),
        }
    }
}

/// Try benchmark candidates in order; the first non-empty series wins.
pub fn resolve_benchmark(
    data_port: &dyn DataPort,
    candidates: &[Instrument],
    period: Period,
) -> Result<(Instrument, PriceSeries), RotagraphError> {
    for candidate in candidates {
        match data_port.fetch_closes(&candidate.symbol, period) {
            Ok(series) if !series.is_empty() => {
                tracing::info!(
                    benchmark = %candidate.name,
                    symbol = %candidate.symbol,
                    observations = series.len(),
                    "benchmark loaded"
                );
                return Ok((candidate.clone(), series));
            }
            Ok(_) => {
                tracing::warn!(symbol = %candidate.symbol, "benchmark candidate has no data");
            }
            Err(e) => {
                tracing::warn!(symbol = %candidate.symbol, error = %e, "benchmark candidate failed");
            }
        }
    }

    Err(RotagraphError::BenchmarkUnavailable {
        tried: candidates.iter().map(|c| c.symbol.clone()).collect(),
    })
}

pub struct SectorFetch {
    pub loaded: Vec<SectorSeries>,
    pub skipped: Vec<SkippedSector>,
}

/// Load every sector; failures are skipped, never fatal.
pub fn fetch_sectors(data_port: &dyn DataPort, sectors: &[Instrument], period: Period) -> SectorFetch {
    let mut loaded = Vec::with_capacity(sectors.len());
    let mut skipped = Vec::new();

    for sector in sectors {
        match data_port.fetch_closes(&sector.symbol, period) {
            Ok(series) if !series.is_empty() => {
                tracing::debug!(sector = %sector.name, observations = series.len(), "sector loaded");
                loaded.push(SectorSeries::new(&sector.name, series));
            }
            Ok(_) => {
                tracing::warn!(sector = %sector.name, symbol = %sector.symbol, "skipping sector (no data)");
                skipped.push(SkippedSector {
                    sector: sector.name.clone(),
                    symbol: sector.symbol.clone(),
                    reason: SkipReason::NoData,
                });
            }
            Err(e) => {
                tracing::warn!(sector = %sector.name, symbol = %sector.symbol, error = %e, "skipping sector");
                skipped.push(SkippedSector {
                    sector: sector.name.clone(),
                    symbol: sector.symbol.clone(),
                    reason: SkipReason::FetchFailed(e.to_string()),
                });
            }
        }
    }

    SectorFetch { loaded, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pairs_basic() {
        let result = parse_pairs("Bank:^NSEBANK, IT:^CNXIT").unwrap();
        assert_eq!(
            result,
            vec![
                Instrument {
                    name: "Bank".into(),
                    symbol: "^NSEBANK".into()
                },
                Instrument {
                    name: "IT".into(),
                    symbol: "^CNXIT".into()
                },
            ]
        );
    }

    #[test]
    fn parse_pairs_names_with_spaces() {
        let result = parse_pairs("NIFTY 50 (ETF):NIFTYBEES.NS").unwrap();
        assert_eq!(result[0].name, "NIFTY 50 (ETF)");
        assert_eq!(result[0].symbol, "NIFTYBEES.NS");
    }

    #[test]
    fn parse_pairs_empty_token() {
        let result = parse_pairs("Bank:^NSEBANK,,IT:^CNXIT");
        assert_eq!(result, Err(UniverseError::EmptyToken));
    }

    #[test]
    fn parse_pairs_missing_symbol() {
        assert!(matches!(parse_pairs("Bank"), Err(UniverseError::MissingSymbol(s)) if s == "Bank"));
        assert!(matches!(parse_pairs("Bank:"), Err(UniverseError::MissingSymbol(_))));
    }

    #[test]
    fn parse_pairs_duplicate_name() {
        let result = parse_pairs("IT:^CNXIT, it:OTHER");
        assert!(matches!(result, Err(UniverseError::DuplicateName(s)) if s == "it"));
    }

    #[test]
    fn parse_pairs_empty_input() {
        assert_eq!(parse_pairs("  "), Err(UniverseError::Empty));
    }

    #[test]
    fn defaults_parse() {
        assert_eq!(parse_pairs(DEFAULT_BENCHMARKS).unwrap().len(), 3);
        let sectors = parse_pairs(DEFAULT_SECTORS).unwrap();
        assert_eq!(sectors.len(), 7);
        assert_eq!(sectors[6].name, "Energy");
    }

    #[test]
    fn universe_sector_lookup_ignores_case() {
        let universe = Universe {
            benchmarks: vec![],
            sectors: parse_pairs(DEFAULT_SECTORS).unwrap(),
        };
        assert_eq!(universe.sector("fmcg").unwrap().symbol, "^CNXFMCG");
        assert!(universe.sector("Realty").is_none());
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NoData.to_string(), "no data");
        assert_eq!(
            SkipReason::FetchFailed("timeout".into()).to_string(),
            "fetch failed: timeout"
        );
    }
}
