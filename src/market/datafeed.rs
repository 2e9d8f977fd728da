//! Datafeed abstraction for market data sources.

use async_trait::async_trait;

use super::constant::TimeFrame;
use super::object::KlineSeries;
use crate::error::FetchError;

/// Number of most recent intervals requested when none is specified
pub const DEFAULT_CANDLE_LIMIT: u32 = 500;

/// Source of candle and ticker data.
///
/// Every call is an independent request: no caching, no retry. An `Err`
/// means the whole call failed.
#[async_trait]
pub trait MarketDataFeed: Send + Sync {
    /// Query the `limit` most recent candles of `time_frame`
    async fn fetch_candles(
        &self,
        time_frame: TimeFrame,
        limit: u32,
    ) -> Result<KlineSeries, FetchError>;

    /// Query the last traded price
    async fn fetch_current_price(&self) -> Result<f64, FetchError>;
}
