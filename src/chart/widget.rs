//! Chart widget with crosshair, zoom, and pan support.

use egui::{Align2, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui, Vec2};
use tracing::debug;

use super::base::{
    calculate_axis_ticks, format_price, format_volume, AXIS_X_HEIGHT, AXIS_Y_WIDTH, MARGIN,
    VOLUME_HEIGHT_RATIO, ZOOM_STEP,
};
use super::item::{value_to_y, CandleItem, ChartItem, VolumeItem};
use super::style::{ChartTheme, CURSOR_COLOR};
use super::surface::ChartSurface;
use crate::market::TimeFrame;

/// Minimum horizontal distance between two time axis labels
const X_LABEL_SPACING: f32 = 120.0;

/// Decimal places of price labels
const PRICE_DECIMALS: usize = 2;

/// Candlestick chart with a volume pane underneath.
///
/// The surface is created once and kept for the widget's lifetime; data,
/// theme and width changes are applied in place.
pub struct ChartWidget {
    /// Series and time scale
    surface: ChartSurface,
    /// Candlestick item
    candle_item: CandleItem,
    /// Volume item
    volume_item: VolumeItem,
    /// Palette matching the current application theme
    theme: ChartTheme,
    /// Fixed height of the widget; width follows the container
    height: f32,
}

impl ChartWidget {
    /// Create a new chart widget
    pub fn new(height: f32) -> Self {
        Self {
            surface: ChartSurface::new(),
            candle_item: CandleItem::new(),
            volume_item: VolumeItem::new(),
            theme: ChartTheme::default(),
            height,
        }
    }

    pub fn surface(&self) -> &ChartSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut ChartSurface {
        &mut self.surface
    }

    pub fn theme(&self) -> ChartTheme {
        self.theme
    }

    /// Switch palette when the application theme changed
    pub fn sync_theme(&mut self, dark_mode: bool) {
        if self.theme.dark != dark_mode {
            self.theme = ChartTheme::for_dark_mode(dark_mode);
            debug!("Chart theme switched, dark: {}", dark_mode);
        }
    }

    /// Handle mouse drag for panning
    fn handle_drag(&mut self, response: &Response) {
        if response.dragged() {
            let dx = response.drag_delta().x;
            if dx != 0.0 {
                self.surface.pan_by_pixels(dx);
            }
        }
    }

    /// Handle mouse wheel for zooming
    fn handle_scroll(&mut self, ui: &Ui, response: &Response) {
        if !response.hovered() {
            return;
        }
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll > 0.0 {
            self.surface.zoom(ZOOM_STEP);
        } else if scroll < 0.0 {
            self.surface.zoom(1.0 / ZOOM_STEP);
        }
    }

    /// Show the chart widget
    pub fn show(&mut self, ui: &mut Ui, time_frame: TimeFrame) -> Response {
        self.sync_theme(ui.visuals().dark_mode);

        let size = Vec2::new(ui.available_width(), self.height);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, self.theme.background);

        let chart_area = Rect::from_min_max(
            Pos2::new(rect.left() + MARGIN, rect.top() + MARGIN),
            Pos2::new(
                rect.right() - MARGIN - AXIS_Y_WIDTH,
                rect.bottom() - MARGIN - AXIS_X_HEIGHT,
            ),
        );
        self.surface.resize(chart_area.width());

        self.handle_drag(&response);
        self.handle_scroll(ui, &response);

        let volume_height = chart_area.height() * VOLUME_HEIGHT_RATIO;
        let candle_rect = Rect::from_min_max(
            chart_area.min,
            Pos2::new(chart_area.max.x, chart_area.max.y - volume_height),
        );
        let volume_rect = Rect::from_min_max(
            Pos2::new(chart_area.min.x, chart_area.max.y - volume_height),
            chart_area.max,
        );

        let Some((min_ix, max_ix)) = self.surface.visible_range() else {
            painter.text(
                chart_area.center(),
                Align2::CENTER_CENTER,
                "Loading...",
                FontId::proportional(20.0),
                self.theme.text,
            );
            return response;
        };

        let manager = self.surface.manager();
        let (price_min, price_max) = self.candle_item.get_y_range(manager, min_ix, max_ix);
        let price_padding = (price_max - price_min) * 0.05;
        let (price_min, price_max) = (price_min - price_padding, price_max + price_padding);

        let (vol_min, vol_max) = self.volume_item.get_y_range(manager, min_ix, max_ix);
        let vol_max = vol_max * 1.1;

        self.draw_x_axis(&painter, chart_area, min_ix, max_ix, time_frame);
        self.draw_y_axis(&painter, candle_rect, price_min, price_max, true);
        self.draw_y_axis(&painter, volume_rect, vol_min, vol_max, false);

        let clipped = painter.with_clip_rect(chart_area);
        self.volume_item.draw(
            &clipped,
            &self.surface,
            volume_rect,
            min_ix,
            max_ix,
            vol_min,
            vol_max,
        );
        self.candle_item.draw(
            &clipped,
            &self.surface,
            candle_rect,
            min_ix,
            max_ix,
            price_min,
            price_max,
        );

        let border = Stroke::new(1.0, self.theme.grid);
        painter.rect_stroke(chart_area, 0.0, border, StrokeKind::Inside);

        if let Some(pos) = response.hover_pos().filter(|p| chart_area.contains(*p)) {
            self.draw_cursor(&painter, pos, chart_area, candle_rect, price_min, price_max);
        }

        response
    }

    /// Draw horizontal grid lines and value labels right of `chart_rect`
    fn draw_y_axis(
        &self,
        painter: &Painter,
        chart_rect: Rect,
        min_val: f64,
        max_val: f64,
        is_price: bool,
    ) {
        let ticks = calculate_axis_ticks(min_val, max_val, if is_price { 6 } else { 2 });

        for tick in ticks {
            let y = value_to_y(tick, chart_rect, min_val, max_val);
            painter.line_segment(
                [Pos2::new(chart_rect.left(), y), Pos2::new(chart_rect.right(), y)],
                Stroke::new(1.0, self.theme.grid),
            );

            let label = if is_price {
                format_price(tick, PRICE_DECIMALS)
            } else {
                format_volume(tick)
            };
            painter.text(
                Pos2::new(chart_rect.right() + 6.0, y),
                Align2::LEFT_CENTER,
                label,
                FontId::proportional(11.0),
                self.theme.text,
            );
        }
    }

    /// Draw vertical grid lines and time labels under the chart
    fn draw_x_axis(
        &self,
        painter: &Painter,
        chart_area: Rect,
        min_ix: usize,
        max_ix: usize,
        time_frame: TimeFrame,
    ) {
        let spacing = self.surface.time_scale().bar_spacing();
        let step = ((X_LABEL_SPACING / spacing).ceil() as usize).max(1);
        let manager = self.surface.manager();

        for ix in (min_ix..=max_ix).filter(|ix| ix % step == 0) {
            let Some(dt) = manager.candle(ix).and_then(|c| c.datetime()) else {
                continue;
            };
            let x = self.surface.index_to_x(ix, chart_area.right());

            painter.line_segment(
                [Pos2::new(x, chart_area.top()), Pos2::new(x, chart_area.bottom())],
                Stroke::new(1.0, self.theme.grid),
            );
            painter.text(
                Pos2::new(x, chart_area.bottom() + 6.0),
                Align2::CENTER_TOP,
                dt.format(time_frame.axis_format()).to_string(),
                FontId::proportional(10.0),
                self.theme.text,
            );
        }
    }

    /// Crosshair and info box for the bar under the pointer
    fn draw_cursor(
        &self,
        painter: &Painter,
        pos: Pos2,
        chart_area: Rect,
        candle_rect: Rect,
        price_min: f64,
        price_max: f64,
    ) {
        let stroke = Stroke::new(1.0, CURSOR_COLOR);
        painter.line_segment(
            [
                Pos2::new(chart_area.left(), pos.y),
                Pos2::new(chart_area.right(), pos.y),
            ],
            stroke,
        );
        painter.line_segment(
            [
                Pos2::new(pos.x, chart_area.top()),
                Pos2::new(pos.x, chart_area.bottom()),
            ],
            stroke,
        );

        if candle_rect.contains(pos) && candle_rect.height() > 0.0 {
            let ratio = ((candle_rect.bottom() - pos.y) / candle_rect.height()) as f64;
            let price = price_min + ratio * (price_max - price_min);
            painter.text(
                Pos2::new(chart_area.right() + 6.0, pos.y),
                Align2::LEFT_CENTER,
                format_price(price, PRICE_DECIMALS),
                FontId::proportional(11.0),
                CURSOR_COLOR,
            );
        }

        let manager = self.surface.manager();
        let Some(ix) = self
            .surface
            .time_scale()
            .x_to_index(pos.x, manager.count(), chart_area.right())
        else {
            return;
        };

        let info = format!(
            "{}\n{}",
            self.candle_item.get_info_text(manager, ix),
            self.volume_item.get_info_text(manager, ix)
        );
        painter.text(
            chart_area.left_top() + Vec2::new(6.0, 6.0),
            Align2::LEFT_TOP,
            info,
            FontId::monospace(12.0),
            self.theme.text,
        );
    }
}
