//! Gateway module - Exchange gateway implementations.
//!
//! - **binance**: Binance spot REST market data

pub mod binance;

// Re-exports
pub use binance::{BinanceDatafeed, BinanceRestClient};
