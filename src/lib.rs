//! BTC Dashboard - Bitcoin candlestick and volume dashboard
//!
//! This crate provides:
//!
//! - Market data model and the `MarketDataFeed` abstraction
//! - A Binance spot REST datafeed (klines and ticker price)
//! - A GUI independent chart surface with pan, zoom and fit
//! - The dashboard view state and the controller driving the datafeed
//! - An egui application (with `gui` feature)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use btc_dashboard::config::DashboardConfig;
//! use btc_dashboard::gateway::BinanceDatafeed;
//! use btc_dashboard::market::{MarketDataFeed, TimeFrame};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), btc_dashboard::FetchError> {
//!     let feed = BinanceDatafeed::from_config(&DashboardConfig::default())?;
//!     let series = feed.fetch_candles(TimeFrame::Hour1, 500).await?;
//!     println!("{} candles", series.len());
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod market;
pub mod view;

#[cfg(feature = "gui")]
pub mod app;

// Re-export commonly used types
pub use config::DashboardConfig;
pub use error::{ConfigError, FetchError};
pub use gateway::BinanceDatafeed;
pub use market::{Candle, KlineSeries, MarketDataFeed, PriceReadout, TimeFrame, VolumeBar};
pub use view::{DashboardController, DashboardState, ViewPhase};

#[cfg(feature = "gui")]
pub use app::DashboardApp;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
