//! Dashboard configuration.
//!
//! Settings are read from `<config_dir>/btc_dashboard/dashboard.json`. Every
//! field is optional in the file; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gateway::binance::constants::{DEFAULT_SYMBOL, DEFAULT_TIMEOUT_SECS, SPOT_REST_HOST};
use crate::market::{TimeFrame, DEFAULT_CANDLE_LIMIT};

/// Height of the chart surface in points
pub const DEFAULT_CHART_HEIGHT: f32 = 700.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// REST API base URL
    pub rest_host: String,
    /// Trading pair
    pub symbol: String,
    /// Candles requested per time frame switch
    pub candle_limit: u32,
    /// Time frame selected at startup
    pub default_time_frame: TimeFrame,
    pub chart_height: f32,
    pub request_timeout_secs: u64,
    /// Proxy host (empty means no proxy)
    pub proxy_host: String,
    /// Proxy port (0 means no proxy)
    pub proxy_port: u16,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rest_host: SPOT_REST_HOST.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            candle_limit: DEFAULT_CANDLE_LIMIT,
            default_time_frame: TimeFrame::default(),
            chart_height: DEFAULT_CHART_HEIGHT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_host: String::new(),
            proxy_port: 0,
            log_level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Proxy URL when both host and port are set
    pub fn proxy_url(&self) -> Option<String> {
        if self.proxy_host.is_empty() || self.proxy_port == 0 {
            return None;
        }
        Some(format!("http://{}:{}", self.proxy_host, self.proxy_port))
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("btc_dashboard").join("dashboard.json"))
    }
}
