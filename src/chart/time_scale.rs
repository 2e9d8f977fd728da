//! Horizontal time scale: which bars are visible and where they are drawn.
//!
//! Positions are expressed in bar units. `right_offset` is the distance from
//! the latest bar to the right edge of the chart; a positive value leaves
//! blank space after the latest bar, a negative value means the chart is
//! scrolled back in time.

/// Blank bars kept after the latest bar
pub const DEFAULT_RIGHT_OFFSET: f32 = 10.0;
/// Initial pixel width of one bar slot
pub const DEFAULT_BAR_SPACING: f32 = 15.0;
pub const MIN_BAR_SPACING: f32 = 0.5;
pub const MAX_BAR_SPACING: f32 = 50.0;

/// Tolerance for float error at the edges of the visible range
const EDGE_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    bar_spacing: f32,
    right_offset: f32,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            bar_spacing: DEFAULT_BAR_SPACING,
            right_offset: DEFAULT_RIGHT_OFFSET,
        }
    }

    pub fn bar_spacing(&self) -> f32 {
        self.bar_spacing
    }

    pub fn right_offset(&self) -> f32 {
        self.right_offset
    }

    /// Restore the initial spacing and offset
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Inclusive index range of bars at least partly inside `width` pixels
    pub fn visible_range(&self, count: usize, width: f32) -> Option<(usize, usize)> {
        if count == 0 || width <= 0.0 {
            return None;
        }

        let last = (count - 1) as f32;
        let right = last + self.right_offset;
        let left = right - width / self.bar_spacing + 1.0;

        let min_ix = (left - EDGE_EPSILON).ceil().max(0.0);
        let max_ix = (right + EDGE_EPSILON).floor().min(last);
        if min_ix > max_ix {
            return None;
        }
        Some((min_ix as usize, max_ix as usize))
    }

    /// Center x of bar `ix` for a chart whose right edge is at `right_x`
    pub fn index_to_x(&self, ix: usize, count: usize, right_x: f32) -> f32 {
        let right = count.saturating_sub(1) as f32 + self.right_offset;
        right_x - (right - ix as f32) * self.bar_spacing - self.bar_spacing * 0.5
    }

    /// Bar under `x`, if any
    pub fn x_to_index(&self, x: f32, count: usize, right_x: f32) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let right = (count - 1) as f32 + self.right_offset;
        let ix = (right - ((right_x - x) / self.bar_spacing - 0.5)).round();
        if ix < 0.0 || ix > (count - 1) as f32 {
            return None;
        }
        Some(ix as usize)
    }

    /// Pan by a pointer drag of `dx` pixels. Dragging right reveals older bars.
    pub fn scroll_by_pixels(&mut self, dx: f32, count: usize, width: f32) {
        self.right_offset -= dx / self.bar_spacing;
        self.clamp(count, width);
    }

    /// Follow a width change so the same bars stay on screen
    pub fn rescale_width(&mut self, old_width: f32, new_width: f32) {
        if old_width <= 0.0 || new_width <= 0.0 {
            return;
        }
        self.bar_spacing *= new_width / old_width;
    }

    /// Scale bar spacing by `factor`, keeping the right edge fixed.
    ///
    /// A spacing already outside the zoom bounds (after a fit or a resize)
    /// is never pushed further out.
    pub fn zoom(&mut self, factor: f32, count: usize, width: f32) {
        let min = MIN_BAR_SPACING.min(self.bar_spacing);
        let max = MAX_BAR_SPACING.max(self.bar_spacing);
        self.bar_spacing = (self.bar_spacing * factor).clamp(min, max);
        self.clamp(count, width);
    }

    /// Make every bar visible at once, going below the zoom bounds if needed
    pub fn fit_content(&mut self, count: usize, width: f32) {
        if count == 0 || width <= 0.0 {
            return;
        }
        self.bar_spacing = (width / count as f32).min(MAX_BAR_SPACING);
        self.right_offset = 0.0;
    }

    /// Keep at least one bar on screen
    fn clamp(&mut self, count: usize, width: f32) {
        let min = -(count.saturating_sub(1) as f32);
        let max = (width / self.bar_spacing - 1.0).max(0.0);
        self.right_offset = self.right_offset.clamp(min, max.max(min));
    }
}
