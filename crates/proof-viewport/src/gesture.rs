//! Gesture classification state
//!
//! A press starts as a potential click and becomes a pan once movement
//! exceeds the threshold; the promotion is sticky for the rest of the
//! press. The two-finger pinch is tracked independently by the presence
//! of a baseline distance and takes precedence while two touch points
//! are active.

use crate::transform::Point;

/// Single-pointer gesture state machine:
/// `Idle -> Pressed -> {click | Panning} -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerGesture {
    #[default]
    Idle,
    /// Pressed, movement still under the pan threshold
    Pressed { start: Point, pan_at_start: Point },
    /// Locked into panning for the remainder of the press
    Panning { start: Point, pan_at_start: Point },
}

impl PointerGesture {
    /// Whether a pointer or touch is currently held down
    pub fn is_down(&self) -> bool {
        !matches!(self, PointerGesture::Idle)
    }
}
