//! Drawing surface contract
//!
//! The engine does not render; it hands scale-corrected stroke requests
//! to whatever 2D surface the host provides. Any vector API that can
//! stroke a rectangle with a color, width and dash pattern qualifies.

use crate::specs::Rect;

/// RGB stroke color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const CYAN: Color = Color {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const MAGENTA: Color = Color {
        r: 255,
        g: 0,
        b: 255,
    };
    pub const YELLOW: Color = Color {
        r: 255,
        g: 255,
        b: 0,
    };
}

/// Visual identity of a stroked guide
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in surface units
    pub width: f32,
    /// Dash/gap lengths; `None` strokes a solid line
    pub dash: Option<[f32; 2]>,
}

/// A 2D surface that can stroke rectangles.
///
/// `scale_factor` reports the surface's current drawing scale so stroke
/// widths can be descaled to a constant on-screen thickness under zoom.
pub trait StrokeSurface {
    fn scale_factor(&self) -> f32;
    fn stroke_rect(&mut self, rect: Rect, style: &StrokeStyle);
}
