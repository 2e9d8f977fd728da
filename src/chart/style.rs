//! Chart colors and the light/dark palettes.

use egui::Color32;

use crate::market::BarColor;

// Price movement colors
pub const UP_COLOR: Color32 = Color32::from_rgb(0x26, 0xa6, 0x9a);
pub const DOWN_COLOR: Color32 = Color32::from_rgb(0xef, 0x53, 0x50);

// Crosshair
pub const CURSOR_COLOR: Color32 = Color32::from_rgb(0x75, 0x86, 0x96);

pub fn bar_color(color: BarColor) -> Color32 {
    match color {
        BarColor::Up => UP_COLOR,
        BarColor::Down => DOWN_COLOR,
    }
}

/// Surface colors that follow the application theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTheme {
    pub dark: bool,
    pub background: Color32,
    pub text: Color32,
    pub grid: Color32,
}

impl ChartTheme {
    pub const LIGHT: ChartTheme = ChartTheme {
        dark: false,
        background: Color32::from_rgb(0xff, 0xff, 0xff),
        text: Color32::from_rgb(0x00, 0x00, 0x00),
        grid: Color32::from_rgb(0xe0, 0xe0, 0xe0),
    };

    pub const DARK: ChartTheme = ChartTheme {
        dark: true,
        background: Color32::from_rgb(0x1f, 0x29, 0x37),
        text: Color32::from_rgb(0xff, 0xff, 0xff),
        grid: Color32::from_rgb(0x37, 0x41, 0x51),
    };

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::LIGHT
    }
}
