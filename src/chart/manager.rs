//! Series data manager for the chart module.
//!
//! Holds the candlestick and volume series shown by the chart and answers
//! range queries for the visible window.

use crate::market::{Candle, KlineSeries, VolumeBar};

/// Owns the two data series of the chart
#[derive(Debug, Default)]
pub struct SeriesManager {
    /// Ordered candlestick series
    candles: Vec<Candle>,
    /// Volume series, aligned with `candles` by index
    volumes: Vec<VolumeBar>,
}

impl SeriesManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both series with the result of a fetch.
    ///
    /// Previous data is dropped, never merged.
    pub fn set_data(&mut self, series: KlineSeries) {
        let KlineSeries { candles, volumes } = series;
        self.candles = candles;
        self.volumes = volumes;
    }

    /// Get total number of bars
    pub fn count(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candle(&self, ix: usize) -> Option<&Candle> {
        self.candles.get(ix)
    }

    pub fn volume(&self, ix: usize) -> Option<&VolumeBar> {
        self.volumes.get(ix)
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn volumes(&self) -> &[VolumeBar] {
        &self.volumes
    }

    /// Lowest low and highest high over `min_ix..=max_ix`
    pub fn price_range(&self, min_ix: usize, max_ix: usize) -> (f64, f64) {
        let Some(candles) = clamp_slice(&self.candles, min_ix, max_ix) else {
            return (0.0, 1.0);
        };

        candles.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.low), hi.max(c.high))
        })
    }

    /// Zero and the largest volume over `min_ix..=max_ix`
    pub fn volume_range(&self, min_ix: usize, max_ix: usize) -> (f64, f64) {
        let Some(volumes) = clamp_slice(&self.volumes, min_ix, max_ix) else {
            return (0.0, 1.0);
        };

        let max_volume = volumes.iter().map(|v| v.value).fold(0.0, f64::max);
        (0.0, max_volume)
    }

    /// Clear all data
    pub fn clear_all(&mut self) {
        self.candles.clear();
        self.volumes.clear();
    }
}

fn clamp_slice<T>(items: &[T], min_ix: usize, max_ix: usize) -> Option<&[T]> {
    let max_ix = max_ix.min(items.len().checked_sub(1)?);
    if min_ix > max_ix {
        return None;
    }
    Some(&items[min_ix..=max_ix])
}
