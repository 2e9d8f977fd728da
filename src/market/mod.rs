//! Market data model and the datafeed trait.

pub mod constant;
pub mod datafeed;
pub mod object;

pub use constant::TimeFrame;
pub use datafeed::{MarketDataFeed, DEFAULT_CANDLE_LIMIT};
pub use object::{BarColor, Candle, KlineSeries, PriceReadout, VolumeBar};
