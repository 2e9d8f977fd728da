//! Chart items for rendering candlesticks and volume bars.

use egui::{Painter, Pos2, Rect, Stroke};

use super::base::BAR_WIDTH_RATIO;
use super::manager::SeriesManager;
use super::style::{bar_color, DOWN_COLOR, UP_COLOR};
use super::surface::ChartSurface;

/// Trait for chart items that can be drawn
pub trait ChartItem {
    /// Get the Y-axis range for the given X-axis range
    fn get_y_range(&self, manager: &SeriesManager, min_ix: usize, max_ix: usize) -> (f64, f64);

    /// Get info text for a specific bar index
    fn get_info_text(&self, manager: &SeriesManager, ix: usize) -> String;

    /// Draw the visible bars into `rect`
    #[allow(clippy::too_many_arguments)]
    fn draw(
        &self,
        painter: &Painter,
        surface: &ChartSurface,
        rect: Rect,
        min_ix: usize,
        max_ix: usize,
        y_min: f64,
        y_max: f64,
    );
}

/// Convert a value to screen Y coordinate
pub fn value_to_y(value: f64, rect: Rect, y_min: f64, y_max: f64) -> f32 {
    let y_range = y_max - y_min;
    if y_range == 0.0 {
        return rect.center().y;
    }
    let normalized = (value - y_min) / y_range;
    rect.bottom() - (normalized as f32 * rect.height())
}

/// Opacity of volume bars
const VOLUME_ALPHA: f32 = 0.6;

fn body_width(surface: &ChartSurface) -> f32 {
    (surface.time_scale().bar_spacing() * BAR_WIDTH_RATIO).max(1.0)
}

/// Candlestick series
#[derive(Default)]
pub struct CandleItem;

impl CandleItem {
    pub fn new() -> Self {
        Self
    }
}

impl ChartItem for CandleItem {
    fn get_y_range(&self, manager: &SeriesManager, min_ix: usize, max_ix: usize) -> (f64, f64) {
        manager.price_range(min_ix, max_ix)
    }

    fn get_info_text(&self, manager: &SeriesManager, ix: usize) -> String {
        let Some(candle) = manager.candle(ix) else {
            return String::new();
        };
        let date = candle
            .datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        format!(
            "{}\nO {:.2}  H {:.2}  L {:.2}  C {:.2}",
            date, candle.open, candle.high, candle.low, candle.close
        )
    }

    fn draw(
        &self,
        painter: &Painter,
        surface: &ChartSurface,
        rect: Rect,
        min_ix: usize,
        max_ix: usize,
        y_min: f64,
        y_max: f64,
    ) {
        let manager = surface.manager();
        let candle_width = body_width(surface);

        for ix in min_ix..=max_ix {
            let Some(candle) = manager.candle(ix) else {
                continue;
            };
            let x = surface.index_to_x(ix, rect.right());
            let color = if candle.is_up() { UP_COLOR } else { DOWN_COLOR };

            // Wick
            let high_y = value_to_y(candle.high, rect, y_min, y_max);
            let low_y = value_to_y(candle.low, rect, y_min, y_max);
            painter.line_segment(
                [Pos2::new(x, high_y), Pos2::new(x, low_y)],
                Stroke::new(1.0, color),
            );

            // Body, at least one pixel tall for doji
            let open_y = value_to_y(candle.open, rect, y_min, y_max);
            let close_y = value_to_y(candle.close, rect, y_min, y_max);
            let top = open_y.min(close_y);
            let bottom = open_y.max(close_y).max(top + 1.0);
            let body = Rect::from_min_max(
                Pos2::new(x - candle_width * 0.5, top),
                Pos2::new(x + candle_width * 0.5, bottom),
            );
            painter.rect_filled(body, 0.0, color);
        }
    }
}

/// Volume histogram series
#[derive(Default)]
pub struct VolumeItem;

impl VolumeItem {
    pub fn new() -> Self {
        Self
    }
}

impl ChartItem for VolumeItem {
    fn get_y_range(&self, manager: &SeriesManager, min_ix: usize, max_ix: usize) -> (f64, f64) {
        manager.volume_range(min_ix, max_ix)
    }

    fn get_info_text(&self, manager: &SeriesManager, ix: usize) -> String {
        manager
            .volume(ix)
            .map(|v| format!("Vol {:.2}", v.value))
            .unwrap_or_default()
    }

    fn draw(
        &self,
        painter: &Painter,
        surface: &ChartSurface,
        rect: Rect,
        min_ix: usize,
        max_ix: usize,
        y_min: f64,
        y_max: f64,
    ) {
        let manager = surface.manager();
        let bar_width = body_width(surface);

        for ix in min_ix..=max_ix {
            let Some(volume) = manager.volume(ix) else {
                continue;
            };
            let x = surface.index_to_x(ix, rect.right());
            let top_y = value_to_y(volume.value, rect, y_min, y_max);

            let bar_rect = Rect::from_min_max(
                Pos2::new(x - bar_width * 0.5, top_y),
                Pos2::new(x + bar_width * 0.5, rect.bottom()),
            );
            let color = bar_color(volume.color).gamma_multiply(VOLUME_ALPHA);
            painter.rect_filled(bar_rect, 0.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{Candle, KlineSeries};

    #[test]
    fn test_value_to_y() {
        let rect = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 200.0));
        assert_eq!(value_to_y(0.0, rect, 0.0, 10.0), 200.0);
        assert_eq!(value_to_y(10.0, rect, 0.0, 10.0), 0.0);
        assert_eq!(value_to_y(5.0, rect, 5.0, 5.0), 100.0);
    }

    #[test]
    fn test_info_text() {
        let mut manager = SeriesManager::new();
        let mut series = KlineSeries::default();
        series.push(
            Candle {
                time: 1_700_000_000,
                open: 100.0,
                high: 110.0,
                low: 90.0,
                close: 105.0,
            },
            50.0,
        );
        manager.set_data(series);

        let text = CandleItem::new().get_info_text(&manager, 0);
        assert!(text.starts_with("2023-11-14 22:13"));
        assert!(text.contains("C 105.00"));
        assert_eq!(VolumeItem::new().get_info_text(&manager, 0), "Vol 50.00");
        assert_eq!(VolumeItem::new().get_info_text(&manager, 3), "");
    }
}
