//! Binance API constants.

// ============================================================================
// REST API Hosts
// ============================================================================

/// Spot REST API host (production)
pub const SPOT_REST_HOST: &str = "https://api.binance.com";

// ============================================================================
// REST API Paths
// ============================================================================

/// Kline/candlestick data
pub const KLINES_PATH: &str = "/api/v3/klines";

/// Latest price for a symbol
pub const TICKER_PRICE_PATH: &str = "/api/v3/ticker/price";

// ============================================================================
// Request Limits
// ============================================================================

/// Trading pair shown by the dashboard
pub const DEFAULT_SYMBOL: &str = "BTCUSDT";

/// Largest `limit` accepted by the klines endpoint
pub const MAX_KLINE_LIMIT: u32 = 1000;

/// Fields every kline row must carry: open time, OHLC, volume
pub const KLINE_ROW_MIN_FIELDS: usize = 6;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
