//! Viewport transform state

/// Lowest allowed zoom factor
pub const MIN_ZOOM: f32 = 0.25;

/// Highest allowed zoom factor
pub const MAX_ZOOM: f32 = 5.0;

/// Multiplicative zoom step for one wheel notch (inverted for zoom-out)
pub const WHEEL_ZOOM_FACTOR: f32 = 1.1;

/// Pointer movement in screen pixels before a press becomes a pan
pub const PAN_THRESHOLD_PX: f32 = 5.0;

/// A 2D point or offset in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// The single authoritative zoom/pan state of a viewer.
///
/// Owned and mutated exclusively by the controller; everyone else
/// receives copies through the change notification. Pan is expressed in
/// canvas/document units (screen deltas are divided by zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    pub zoom: f32,
    pub pan: Point,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform() {
        let t = TransformState::default();
        assert_eq!(t.zoom, 1.0);
        assert_eq!(t.pan, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_point_midpoint() {
        let m = Point::new(0.0, 10.0).midpoint(Point::new(10.0, 20.0));
        assert_eq!(m, Point::new(5.0, 15.0));
    }
}
