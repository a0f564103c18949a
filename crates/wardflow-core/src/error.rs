//! Error types for configuration, forecasting and engine control.

use std::path::PathBuf;

use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        ConfigError::Invalid(msg.into())
    }
}

/// Failure of an external forecaster. The prediction tick recovers from all
/// of these with the synthetic fallback.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("forecaster unreachable: {0}")]
    Transport(String),

    #[error("forecaster timed out after {0} ms")]
    Timeout(u64),

    #[error("unexpected forecaster response: {0}")]
    Schema(String),

    #[error("forecaster unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn {processor} timer thread: {source}")]
    Spawn {
        processor: &'static str,
        #[source]
        source: std::io::Error,
    },
}
