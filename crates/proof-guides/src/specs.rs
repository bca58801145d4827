//! Guide-relevant document attributes and canvas geometry
//!
//! These types carry the host's view of a document into the geometry
//! functions. `RenderInfo` is recomputed by the host on every transform
//! change; everything else is immutable per view session.

use crate::dimensions::DimensionSpec;
use crate::units::Length;

/// A rectangular area. Units depend on context: points for trim
/// dimensions, canvas pixels for render geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Expand outward on all four sides by `amount` (negative shrinks)
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2.0 * amount,
            height: self.height + 2.0 * amount,
        }
    }
}

/// On-canvas bounding box of the currently rendered document page,
/// in device/canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderInfo {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RenderInfo {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A document's guide-relevant print attributes.
///
/// `bleed` and `safety` fall back to the shop default of 1/8 inch when
/// absent; projects that genuinely have no bleed store an explicit zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintSpecs {
    pub dimensions: DimensionSpec,
    pub bleed: Option<Length>,
    pub safety: Option<Length>,
}

impl PrintSpecs {
    pub fn new(dimensions: DimensionSpec) -> Self {
        Self {
            dimensions,
            bleed: None,
            safety: None,
        }
    }
}

/// Which overlays to draw. Supplied fresh per draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideOptions {
    pub trim: bool,
    pub bleed: bool,
    pub safety: bool,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            trim: true,
            bleed: true,
            safety: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_expand() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0).expand(5.0);
        assert_eq!(r, Rect::new(5.0, 5.0, 110.0, 60.0));
    }

    #[test]
    fn test_rect_shrink_can_invert() {
        // No clamping: a large inset produces a negative-size rect
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).expand(-8.0);
        assert_eq!(r.width, -6.0);
        assert_eq!(r.height, -6.0);
    }
}
