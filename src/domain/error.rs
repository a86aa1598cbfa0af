//! Domain error types.

use crate::domain::universe::UniverseError;

/// Top-level error type for relscreen.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
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

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("no data found for {symbol}")]
    NotFound { symbol: String },

    #[error("{field} unavailable for {symbol}")]
    DataUnavailable { symbol: String, field: String },

    #[error("insufficient history for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("invalid price for {symbol}: {reason}")]
    InvalidPrice { symbol: String, reason: String },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error("worker pool error: {reason}")]
    WorkerPool { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ScreenerError {
    fn from(err: csv::Error) -> Self {
        ScreenerError::Csv {
            reason: err.to_string(),
        }
    }
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) | ScreenerError::Csv { .. } | ScreenerError::WorkerPool { .. } => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::Network { .. }
            | ScreenerError::NotFound { .. }
            | ScreenerError::DataUnavailable { .. } => 3,
            ScreenerError::InsufficientHistory { .. } | ScreenerError::InvalidPrice { .. } => 5,
            ScreenerError::Universe(_) => 6,
        };
        std::process::ExitCode::from(code)
    }
}
