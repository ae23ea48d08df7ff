//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::domain::alignment::{align, resample};
use crate::domain::config_validation::{validate_config, window_range_reason, MAX_WINDOW, MIN_WINDOW};
use crate::domain::error::RotagraphError;
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price_series::PriceSeries;
use crate::domain::quadrant::Quadrant;
use crate::domain::ranking::{rank, RotationSnapshot};
use crate::domain::rotation::compute_rotation;
use crate::domain::settings::{Mode, Period, RotationSettings, Timeframe, DEFAULT_WINDOW};
use crate::domain::signal::{
    daily_entry_signal, gate_daily_entry, MIN_OBSERVATIONS, RSI_PERIOD, SMA_PERIOD,
};
use crate::domain::universe::{
    fetch_sectors, parse_pairs, resolve_benchmark, Instrument, SkippedSector, Universe,
    DEFAULT_BENCHMARKS, DEFAULT_SECTORS,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ReportContext, ReportPort};

const DEFAULT_REPORT: &str = "rrg_report.typ";

#[derive(Parser, Debug)]
#[command(name = "rotagraph", about = "Relative rotation graph for sector indices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify sectors into rotation quadrants and write a report
    Rotate {
        #[arg(short, long)]
        config: PathBuf,
        /// Daily, Weekly or Monthly
        #[arg(long)]
        timeframe: Option<Timeframe>,
        /// 6mo, 1y, 2y or 3y
        #[arg(long)]
        period: Option<Period>,
        /// Swing or Positional
        #[arg(long)]
        mode: Option<Mode>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the daily entry signal for one sector
    Signal {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        sector: String,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for the benchmark and sectors, or one symbol
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

/// CLI overrides for values otherwise read from the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsOverrides {
    pub timeframe: Option<Timeframe>,
    pub period: Option<Period>,
    pub mode: Option<Mode>,
}

/// Result of one rotation run.
#[derive(Debug)]
pub struct RotationOutcome {
    pub benchmark: Instrument,
    pub snapshot: RotationSnapshot,
    pub skipped: Vec<SkippedSector>,
}

/// Install the global subscriber. `RUST_LOG` filters (default `info`);
/// `RUST_LOG_FORMAT=json` switches to JSON lines. Logs go to stderr so
/// stdout stays tabular.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("RUST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("warning: logging already initialised: {e}");
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Rotate {
            config,
            timeframe,
            period,
            mode,
            output,
        } => run_rotate(
            &config,
            SettingsOverrides {
                timeframe,
                period,
                mode,
            },
            output.as_ref(),
        ),
        Command::Signal { config, sector } => run_signal(&config, &sector),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, RotagraphError> {
    FileConfigAdapter::from_file(path).map_err(|e| RotagraphError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn parse_key<T>(config: &dyn ConfigPort, section: &str, key: &str, default: T) -> Result<T, RotagraphError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match config.get_string(section, key) {
        Some(value) => value.parse().map_err(|e: T::Err| RotagraphError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

pub fn build_settings(
    config: &dyn ConfigPort,
    overrides: SettingsOverrides,
) -> Result<RotationSettings, RotagraphError> {
    let defaults = RotationSettings::default();

    let window = parse_key::<i64>(config, "rotation", "window", DEFAULT_WINDOW as i64)?;
    if !(MIN_WINDOW..=MAX_WINDOW).contains(&window) {
        return Err(RotagraphError::ConfigInvalid {
            section: "rotation".into(),
            key: "window".into(),
            reason: window_range_reason(),
        });
    }

    Ok(RotationSettings {
        timeframe: match overrides.timeframe {
            Some(t) => t,
            None => parse_key(config, "rotation", "timeframe", defaults.timeframe)?,
        },
        period: match overrides.period {
            Some(p) => p,
            None => parse_key(config, "rotation", "period", defaults.period)?,
        },
        daily_period: parse_key(config, "data", "daily_period", defaults.daily_period)?,
        mode: match overrides.mode {
            Some(m) => m,
            None => parse_key(config, "rotation", "mode", defaults.mode)?,
        },
        window: window as usize,
    })
}

pub fn build_universe(config: &dyn ConfigPort) -> Result<Universe, RotagraphError> {
    let benchmarks = config
        .get_string("universe", "benchmarks")
        .unwrap_or_else(|| DEFAULT_BENCHMARKS.to_string());
    let sectors = config
        .get_string("universe", "sectors")
        .unwrap_or_else(|| DEFAULT_SECTORS.to_string());

    Ok(Universe {
        benchmarks: parse_pairs(&benchmarks)?,
        sectors: parse_pairs(&sectors)?,
    })
}

pub fn build_data_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, RotagraphError> {
    let dir = config
        .get_string("data", "dir")
        .ok_or_else(|| RotagraphError::ConfigMissing {
            section: "data".into(),
            key: "dir".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(dir)))
}

/// Benchmark, sectors, alignment, resampling, rotation, gating and ranking.
///
/// Daily series are fetched only for sectors whose entry signal is
/// evaluated. A daily fetch failure is logged and evaluates to NO.
pub fn run_rotation(
    data_port: &dyn DataPort,
    settings: &RotationSettings,
    universe: &Universe,
) -> Result<RotationOutcome, RotagraphError> {
    let (benchmark, benchmark_series) =
        resolve_benchmark(data_port, &universe.benchmarks, settings.period)?;

    let fetched = fetch_sectors(data_port, &universe.sectors, settings.period);
    let alignment = align(&benchmark_series, &fetched.loaded)?;
    let table = resample(&alignment.table, settings.timeframe);
    tracing::info!(
        timeframe = %settings.timeframe,
        rows = table.len(),
        sectors = table.sectors.len(),
        "price table ready"
    );

    let rotation = compute_rotation(&table, settings.window);

    let snapshot = rank(&rotation, settings.tail_length(), |sector, quadrant| {
        let evaluate = settings.timeframe == Timeframe::Weekly
            && matches!(quadrant, Quadrant::Leading | Quadrant::Improving);
        let daily = if evaluate {
            load_daily(data_port, universe, sector, settings.daily_period)
        } else {
            None
        };
        gate_daily_entry(settings.timeframe, quadrant, daily.as_ref())
    });

    let mut skipped = fetched.skipped;
    skipped.extend(alignment.skipped);

    tracing::info!(
        benchmark = %benchmark.name,
        ranked = snapshot.rows.len(),
        skipped = skipped.len(),
        "rotation complete"
    );

    Ok(RotationOutcome {
        benchmark,
        snapshot,
        skipped,
    })
}

fn load_daily(
    data_port: &dyn DataPort,
    universe: &Universe,
    sector: &str,
    period: Period,
) -> Option<PriceSeries> {
    let instrument = universe.sector(sector)?;
    match data_port.fetch_closes(&instrument.symbol, period) {
        Ok(series) => Some(series),
        Err(e) => {
            tracing::warn!(sector, symbol = %instrument.symbol, error = %e, "daily data unavailable");
            None
        }
    }
}

pub fn print_snapshot(outcome: &RotationOutcome, settings: &RotationSettings) {
    let snapshot = &outcome.snapshot;
    println!(
        "Benchmark: {} ({})",
        outcome.benchmark.name, outcome.benchmark.symbol
    );
    println!(
        "Timeframe: {}  Period: {}  Mode: {}  As of: {}",
        settings.timeframe,
        settings.period,
        settings.mode,
        snapshot
            .as_of
            .map_or_else(|| "-".to_string(), |d| d.to_string())
    );
    println!();

    let counts: Vec<String> = snapshot
        .counts
        .iter()
        .map(|(q, n)| format!("{}: {}", q, n))
        .collect();
    println!("{}", counts.join("  "));
    println!();

    println!(
        "{:<12} {:>10} {:>12} {:<10} {:<11}",
        "Sector", "RS-Ratio", "RS-Momentum", "Quadrant", "Daily Entry"
    );
    for row in &snapshot.rows {
        println!(
            "{:<12} {:>10.2} {:>12.2} {:<10} {:<11}",
            row.sector,
            row.rs_ratio,
            row.rs_momentum,
            row.quadrant.to_string(),
            row.daily_entry.to_string()
        );
    }

    for s in &outcome.skipped {
        eprintln!("skipped {} ({}): {}", s.sector, s.symbol, s.reason);
    }
    for sector in &snapshot.unclassified {
        eprintln!("unclassified {}: not enough history", sector);
    }
}

fn run_rotate(
    config_path: &PathBuf,
    overrides: SettingsOverrides,
    output_path: Option<&PathBuf>,
) -> Result<(), RotagraphError> {
    tracing::info!(config = %config_path.display(), "loading config");
    let config = load_config(config_path)?;
    validate_config(&config)?;

    let settings = build_settings(&config, overrides)?;
    let universe = build_universe(&config)?;
    let data_port = build_data_adapter(&config)?;

    let outcome = run_rotation(&data_port, &settings, &universe)?;
    print_snapshot(&outcome, &settings);

    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT));
    let reporter = TypstReportAdapter::new(config.get_string("report", "template_path").map(PathBuf::from))
        .with_tails(config.get_bool("report", "include_tails", true));
    let ctx = ReportContext {
        settings: &settings,
        benchmark: &outcome.benchmark,
        snapshot: &outcome.snapshot,
        skipped: &outcome.skipped,
    };
    reporter.write(&ctx, &output.to_string_lossy())?;
    eprintln!("\nReport written to: {}", output.display());
    Ok(())
}

fn run_signal(config_path: &PathBuf, sector_name: &str) -> Result<(), RotagraphError> {
    let config = load_config(config_path)?;
    validate_config(&config)?;
    let settings = build_settings(&config, SettingsOverrides::default())?;
    let universe = build_universe(&config)?;
    let data_port = build_data_adapter(&config)?;

    let sector = universe
        .sector(sector_name)
        .ok_or_else(|| RotagraphError::ConfigInvalid {
            section: "universe".into(),
            key: "sectors".into(),
            reason: format!("unknown sector '{}'", sector_name),
        })?;

    let daily = data_port.fetch_closes(&sector.symbol, settings.daily_period)?;
    if daily.is_empty() {
        return Err(RotagraphError::NoData {
            symbol: sector.symbol.clone(),
        });
    }

    let signal = daily_entry_signal(&daily);
    let sma = calculate_sma(&daily, SMA_PERIOD);
    let rsi = calculate_rsi(&daily, RSI_PERIOD);
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));

    println!("{} ({})", sector.name, sector.symbol);
    println!("  observations: {}", daily.len());
    println!(
        "  close:        {}",
        fmt_opt(daily.points().last().map(|p| p.close))
    );
    println!("  SMA({}):      {}", SMA_PERIOD, fmt_opt(sma.last()));
    println!("  RSI({}):      {}", RSI_PERIOD, fmt_opt(rsi.last()));
    println!("  RSI previous: {}", fmt_opt(rsi.nth_back(1)));
    println!("  daily entry:  {}", signal);
    if daily.len() < MIN_OBSERVATIONS {
        eprintln!(
            "note: fewer than {} observations, signal defaults to NO",
            MIN_OBSERVATIONS
        );
    }
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), RotagraphError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(config_path)?;
    validate_config(&config)?;

    let settings = build_settings(&config, SettingsOverrides::default())?;
    let universe = build_universe(&config)?;

    println!("Configuration is valid.");
    println!("  timeframe:    {}", settings.timeframe);
    println!("  period:       {}", settings.period);
    println!("  daily period: {}", settings.daily_period);
    println!(
        "  mode:         {} (tail {})",
        settings.mode,
        settings.tail_length()
    );
    println!("  window:       {}", settings.window);
    let names = |list: &[Instrument]| {
        list.iter()
            .map(|i| format!("{}:{}", i.name, i.symbol))
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("  benchmarks:   {}", names(&universe.benchmarks));
    println!("  sectors:      {}", names(&universe.sectors));
    Ok(())
}

fn run_list_symbols(config_path: &PathBuf) -> Result<(), RotagraphError> {
    let config = load_config(config_path)?;
    let data_port = build_data_adapter(&config)?;

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    Ok(())
}

fn run_info(config_path: &PathBuf, symbol: Option<&str>) -> Result<(), RotagraphError> {
    let config = load_config(config_path)?;
    let data_port = build_data_adapter(&config)?;

    let symbols: Vec<String> = match symbol {
        Some(s) => vec![s.to_string()],
        None => {
            let universe = build_universe(&config)?;
            universe
                .benchmarks
                .iter()
                .chain(universe.sectors.iter())
                .map(|i| i.symbol.clone())
                .collect()
        }
    };

    for s in &symbols {
        match data_port.get_data_range(s) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} observations, {} to {}", s, count, first, last);
            }
            Ok(None) => eprintln!("{}: no data found", s),
            Err(e) => eprintln!("error querying {}: {}", s, e),
        }
    }
    Ok(())
}
