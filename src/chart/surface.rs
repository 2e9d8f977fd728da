//! Drawing surface state: the two series plus the time scale viewing them.

use super::manager::SeriesManager;
use super::time_scale::TimeScale;
use crate::market::KlineSeries;

/// Everything the chart needs to know besides the GUI itself.
///
/// The width is only known once the surface has been laid out, so a fit
/// requested before that is deferred until the next `resize`.
#[derive(Debug, Default)]
pub struct ChartSurface {
    manager: SeriesManager,
    time_scale: TimeScale,
    width: f32,
    fit_pending: bool,
}

impl ChartSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(&self) -> &SeriesManager {
        &self.manager
    }

    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn bar_count(&self) -> usize {
        self.manager.count()
    }

    /// Replace both series and refit the visible range
    pub fn set_data(&mut self, series: KlineSeries) {
        self.manager.set_data(series);
        self.fit_content();
    }

    pub fn fit_content(&mut self) {
        self.fit_pending = true;
        self.apply_pending_fit();
    }

    /// Track the width of the container. The visible range is kept: bar
    /// spacing scales with the width instead of revealing more bars.
    pub fn resize(&mut self, width: f32) {
        let width = width.max(0.0);
        if width == self.width {
            return;
        }
        if !self.fit_pending {
            self.time_scale.rescale_width(self.width, width);
        }
        self.width = width;
        self.apply_pending_fit();
    }

    pub fn pan_by_pixels(&mut self, dx: f32) {
        self.time_scale.scroll_by_pixels(dx, self.manager.count(), self.width);
    }

    pub fn zoom(&mut self, factor: f32) {
        self.time_scale.zoom(factor, self.manager.count(), self.width);
    }

    pub fn visible_range(&self) -> Option<(usize, usize)> {
        self.time_scale.visible_range(self.manager.count(), self.width)
    }

    /// Center x of bar `ix` for a chart whose right edge is at `right_x`
    pub fn index_to_x(&self, ix: usize, right_x: f32) -> f32 {
        self.time_scale.index_to_x(ix, self.manager.count(), right_x)
    }

    /// Drop all data and return to the initial view
    pub fn clear(&mut self) {
        self.manager.clear_all();
        self.time_scale.reset();
        self.fit_pending = false;
    }

    fn apply_pending_fit(&mut self) {
        if !self.fit_pending || self.width <= 0.0 || self.manager.is_empty() {
            return;
        }
        self.time_scale.fit_content(self.manager.count(), self.width);
        self.fit_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Candle;

    fn series(count: usize) -> KlineSeries {
        let mut series = KlineSeries::with_capacity(count);
        for i in 0..count {
            series.push(
                Candle {
                    time: i as i64 * 3600,
                    open: 1.0,
                    high: 2.0,
                    low: 0.5,
                    close: 1.5,
                },
                3.0,
            );
        }
        series
    }

    #[test]
    fn test_fit_waits_for_width() {
        let mut surface = ChartSurface::new();
        surface.set_data(series(100));
        assert_eq!(surface.visible_range(), None);

        surface.resize(400.0);
        assert_eq!(surface.visible_range(), Some((0, 99)));
        assert_eq!(surface.time_scale().bar_spacing(), 4.0);
    }

    #[test]
    fn test_set_data_refits_after_pan() {
        let mut surface = ChartSurface::new();
        surface.resize(400.0);
        surface.set_data(series(100));
        surface.zoom(2.0);
        surface.pan_by_pixels(80.0);
        assert_ne!(surface.visible_range(), Some((0, 99)));

        surface.set_data(series(40));
        assert_eq!(surface.bar_count(), 40);
        assert_eq!(surface.visible_range(), Some((0, 39)));
    }

    #[test]
    fn test_resize_locks_visible_range() {
        let mut surface = ChartSurface::new();
        surface.resize(400.0);
        surface.set_data(series(100));
        surface.zoom(2.0);
        let before = surface.visible_range();
        assert_eq!(before, Some((50, 99)));

        surface.resize(800.0);
        assert_eq!(surface.visible_range(), before);
        assert_eq!(surface.time_scale().bar_spacing(), 16.0);

        surface.resize(200.0);
        assert_eq!(surface.visible_range(), before);
    }

    #[test]
    fn test_fit_shows_every_bar_of_a_large_series() {
        let mut surface = ChartSurface::new();
        surface.resize(400.0);
        surface.set_data(series(1000));
        assert_eq!(surface.visible_range(), Some((0, 999)));
    }

    #[test]
    fn test_clear_resets_view() {
        let mut surface = ChartSurface::new();
        surface.resize(400.0);
        surface.set_data(series(10));
        surface.clear();
        assert_eq!(surface.bar_count(), 0);
        assert_eq!(surface.time_scale(), &TimeScale::new());
    }
}
