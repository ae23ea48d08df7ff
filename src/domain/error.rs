//! Domain error types.

/// Top-level error type for rotagraph.
///
/// Only failures that stop a run are represented here. A sector that cannot
/// be loaded is recorded as a [`SkippedSector`](crate::domain::universe::SkippedSector)
/// instead, and undefined indicator values are `None`, not errors.
#[derive(Debug, thiserror::Error)]
pub enum RotagraphError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Universe(#[from] crate::domain::universe::UniverseError),

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("benchmark data could not be loaded (tried: {})", tried.join(", "))]
    BenchmarkUnavailable { tried: Vec<String> },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&RotagraphError> for std::process::ExitCode {
    fn from(err: &RotagraphError) -> Self {
        let code: u8 = match err {
            RotagraphError::Io(_) | RotagraphError::Report { .. } => 1,
            RotagraphError::ConfigParse { .. }
            | RotagraphError::ConfigMissing { .. }
            | RotagraphError::ConfigInvalid { .. } => 2,
            RotagraphError::Data { .. } | RotagraphError::NoData { .. } => 3,
            RotagraphError::Universe(_) => 4,
            RotagraphError::BenchmarkUnavailable { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
