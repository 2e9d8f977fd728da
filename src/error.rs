//! Error types for market data fetching and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single market data request.
///
/// Any variant means the whole call failed; callers never receive a partial
/// result.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("rate limited by exchange: {body}")]
    RateLimited { body: String },

    #[error("exchange returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed kline row {index}: {reason}")]
    MalformedRow { index: usize, reason: String },

    #[error("ticker price is not numeric: {0:?}")]
    MalformedPrice(String),

    #[error("kline open times are not strictly increasing at row {index}")]
    NonMonotonic { index: usize },

    #[error("unsupported interval: {0}")]
    UnsupportedInterval(String),

    #[error("limit {0} is outside 1..=1000")]
    InvalidLimit(u32),

    #[error("expected {expected} klines, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
}

/// Failure to load the dashboard configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
