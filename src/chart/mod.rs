//! Chart module for displaying candlestick charts and volume.
//!
//! This module provides:
//! - `SeriesManager` - the candlestick and volume series
//! - `TimeScale` - visible range, pan and zoom in bar units
//! - `ChartSurface` - series plus time scale, independent of the GUI
//! - `CandleItem` / `VolumeItem` - series rendering (`gui` feature)
//! - `ChartWidget` - egui widget with crosshair, drag pan and wheel zoom (`gui` feature)
//!
//! # Example
//!
//! ```ignore
//! use btc_dashboard::chart::ChartWidget;
//!
//! let mut chart = ChartWidget::new(700.0);
//! chart.surface_mut().set_data(series);
//! chart.show(ui, TimeFrame::Hour1);
//! ```

mod base;
mod manager;
mod surface;
mod time_scale;

#[cfg(feature = "gui")]
mod item;
#[cfg(feature = "gui")]
mod style;
#[cfg(feature = "gui")]
mod widget;

pub use base::*;
pub use manager::SeriesManager;
pub use surface::ChartSurface;
pub use time_scale::{TimeScale, DEFAULT_BAR_SPACING, DEFAULT_RIGHT_OFFSET};

#[cfg(feature = "gui")]
pub use item::{CandleItem, ChartItem, VolumeItem};
#[cfg(feature = "gui")]
pub use style::{ChartTheme, DOWN_COLOR, UP_COLOR};
#[cfg(feature = "gui")]
pub use widget::ChartWidget;
