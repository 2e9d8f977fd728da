//! Binance spot market data gateway.

pub mod constants;
mod datafeed;
mod rest_client;

pub use datafeed::{parse_klines, parse_ticker_price, BinanceDatafeed};
pub use rest_client::BinanceRestClient;
