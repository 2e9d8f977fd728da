//! Layout constants and formatting helpers for the chart module.

// Chart dimensions
/// Candle body width as a fraction of the bar slot
pub const BAR_WIDTH_RATIO: f32 = 0.7;
/// Share of the chart height given to the volume pane
pub const VOLUME_HEIGHT_RATIO: f32 = 0.25;
/// Zoom step applied per mouse wheel notch
pub const ZOOM_STEP: f32 = 1.1;

// Layout constants
pub const MARGIN: f32 = 5.0;
pub const AXIS_X_HEIGHT: f32 = 28.0;
pub const AXIS_Y_WIDTH: f32 = 80.0;

/// Format price with appropriate precision
pub fn format_price(price: f64, decimals: usize) -> String {
    format!("{:.prec$}", price, prec = decimals)
}

/// Format volume with appropriate units (K, M, B)
pub fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000_000.0 {
        format!("{:.2}B", volume / 1_000_000_000.0)
    } else if volume >= 1_000_000.0 {
        format!("{:.2}M", volume / 1_000_000.0)
    } else if volume >= 1_000.0 {
        format!("{:.2}K", volume / 1_000.0)
    } else {
        format!("{:.2}", volume)
    }
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    if min_val >= max_val || max_ticks == 0 {
        return vec![min_val];
    }

    let rough_step = (max_val - min_val) / max_ticks as f64;
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    let nice_step = if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };

    let mut ticks = Vec::new();
    let mut value = (min_val / nice_step).ceil() * nice_step;
    while value <= max_val {
        ticks.push(value);
        value += nice_step;
    }
    ticks
}
