//! Market data objects shared by the fetcher and the chart.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC price interval. `time` is the interval open in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Whether the interval closed at or above its open
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }
}

/// Direction color of a volume bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Up,
    Down,
}

impl BarColor {
    pub fn for_candle(candle: &Candle) -> Self {
        if candle.is_up() {
            BarColor::Up
        } else {
            BarColor::Down
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            BarColor::Up => "#26a69a",
            BarColor::Down => "#ef5350",
        }
    }
}

/// Traded volume of one interval, aligned with the candle of the same index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub time: i64,
    pub value: f64,
    pub color: BarColor,
}

/// Candles and volume bars returned by a single fetch.
///
/// Both vectors always have the same length and pairwise-equal `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KlineSeries {
    pub candles: Vec<Candle>,
    pub volumes: Vec<VolumeBar>,
}

impl KlineSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            candles: Vec::with_capacity(capacity),
            volumes: Vec::with_capacity(capacity),
        }
    }

    /// Append one interval, deriving the volume bar color from the candle.
    pub fn push(&mut self, candle: Candle, volume: f64) {
        self.volumes.push(VolumeBar {
            time: candle.time,
            value: volume,
            color: BarColor::for_candle(&candle),
        });
        self.candles.push(candle);
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

/// A price shown in the dashboard header cards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PriceReadout {
    #[default]
    Loading,
    Value(f64),
}

impl PriceReadout {
    pub fn value(&self) -> Option<f64> {
        match self {
            PriceReadout::Loading => None,
            PriceReadout::Value(v) => Some(*v),
        }
    }
}

impl fmt::Display for PriceReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceReadout::Loading => f.write_str("Loading..."),
            PriceReadout::Value(v) => write!(f, "${:.2}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, close: f64) -> Candle {
        Candle {
            time: 1_700_000_000,
            open,
            high: open.max(close),
            low: open.min(close),
            close,
        }
    }

    #[test]
    fn test_bar_color_follows_close_vs_open() {
        assert_eq!(BarColor::for_candle(&candle(100.0, 105.0)), BarColor::Up);
        assert_eq!(BarColor::for_candle(&candle(100.0, 100.0)), BarColor::Up);
        assert_eq!(BarColor::for_candle(&candle(100.0, 99.5)), BarColor::Down);
        assert_eq!(BarColor::Up.hex(), "#26a69a");
        assert_eq!(BarColor::Down.hex(), "#ef5350");
    }

    #[test]
    fn test_series_push_keeps_arrays_aligned() {
        let mut series = KlineSeries::with_capacity(2);
        series.push(candle(1.0, 2.0), 10.0);
        let later = Candle {
            time: 1_700_000_060,
            ..candle(2.0, 1.0)
        };
        series.push(later, 20.0);

        assert_eq!(series.len(), 2);
        assert_eq!(series.volumes.len(), 2);
        assert_eq!(series.volumes[1].time, 1_700_000_060);
        assert_eq!(series.volumes[1].color, BarColor::Down);
    }

    #[test]
    fn test_price_readout_display() {
        assert_eq!(PriceReadout::Loading.to_string(), "Loading...");
        assert_eq!(PriceReadout::Value(43125.5).to_string(), "$43125.50");
        assert_eq!(PriceReadout::Value(1.0).value(), Some(1.0));
    }
}
