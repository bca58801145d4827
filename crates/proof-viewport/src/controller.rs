//! Viewport transform controller
//!
//! Owns the transform and gesture state for one canvas viewer and
//! translates raw pointer/wheel/touch input into transform updates. The
//! host learns about every change through a synchronous callback and
//! re-renders in response; nothing here is asynchronous and every
//! notification delivers a fully consistent snapshot.

use log::debug;

use crate::gesture::PointerGesture;
use crate::surface::{CursorIcon, InputSurface, ToolMode};
use crate::transform::{
    MAX_ZOOM, MIN_ZOOM, PAN_THRESHOLD_PX, Point, TransformState, WHEEL_ZOOM_FACTOR,
};

/// A click synthesized on pointer release, for annotation placement.
/// Only produced when the press never panned and the comment tool is
/// active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasClick {
    pub x: f32,
    pub y: f32,
}

/// Invoked synchronously on every transform change
pub type TransformCallback = Box<dyn FnMut(TransformState)>;

/// Returns the currently active tool; queried per event
pub type ToolProvider = Box<dyn Fn() -> ToolMode>;

pub struct ViewportController<S: InputSurface> {
    surface: S,
    on_transform_change: TransformCallback,
    tool_provider: ToolProvider,
    transform: TransformState,
    pointer: PointerGesture,
    /// Last pinch distance; `Some` while a two-finger gesture is live
    pinch_distance: Option<f32>,
}

impl<S: InputSurface> ViewportController<S> {
    pub fn new(
        surface: S,
        on_transform_change: TransformCallback,
        tool_provider: ToolProvider,
    ) -> Self {
        let mut controller = Self {
            surface,
            on_transform_change,
            tool_provider,
            transform: TransformState::default(),
            pointer: PointerGesture::default(),
            pinch_distance: None,
        };
        controller.refresh_cursor();
        controller
    }

    /// Snapshot of the current transform
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Push cursor feedback to the surface for the current tool and
    /// pointer state. Hosts call this after switching tools.
    pub fn refresh_cursor(&mut self) {
        let cursor = match (self.tool_provider)() {
            ToolMode::Pan => {
                if self.pointer.is_down() {
                    CursorIcon::Grabbing
                } else {
                    CursorIcon::Grab
                }
            }
            ToolMode::Comment => CursorIcon::Crosshair,
        };
        self.surface.set_cursor(cursor);
    }

    fn set_transform(&mut self, next: TransformState) {
        // Never notify on a no-op, e.g. zooming against a bound
        if next != self.transform {
            self.transform = next;
            (self.on_transform_change)(self.transform);
        }
    }

    /// Reset to `{zoom: 1.0, pan: (0, 0)}` and notify unconditionally
    pub fn reset_transform(&mut self) {
        self.transform = TransformState::default();
        (self.on_transform_change)(self.transform);
    }

    // -------------------------------------------------------------------------
    // Zoom
    // -------------------------------------------------------------------------

    /// Zoom by `factor` keeping the document point under `cursor` fixed
    fn zoom_at_point(&mut self, cursor: Point, factor: f32) {
        let old_zoom = self.transform.zoom;
        let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == old_zoom {
            // Clamped against a bound: the pan recomputation below is
            // not bit-exact, so skipping it keeps this a true no-op
            return;
        }

        // Document-space point under the cursor before the zoom
        let canvas_x = cursor.x / old_zoom - self.transform.pan.x;
        let canvas_y = cursor.y / old_zoom - self.transform.pan.y;

        // Pan that keeps the same point under the cursor after
        let pan = Point::new(cursor.x / new_zoom - canvas_x, cursor.y / new_zoom - canvas_y);
        self.set_transform(TransformState {
            zoom: new_zoom,
            pan,
        });
    }

    /// Wheel/trackpad scroll: zooms around the cursor. Scrolling up
    /// (negative delta) zooms in.
    pub fn wheel(&mut self, cursor: Point, scroll_delta_y: f32) {
        let factor = if scroll_delta_y < 0.0 {
            WHEEL_ZOOM_FACTOR
        } else {
            1.0 / WHEEL_ZOOM_FACTOR
        };
        self.zoom_at_point(cursor, factor);
    }

    fn viewer_center(&self) -> Point {
        let (w, h) = self.surface.viewer_size();
        Point::new(w / 2.0, h / 2.0)
    }

    /// One zoom step in, centered on the viewer midpoint
    pub fn zoom_in(&mut self) {
        self.zoom_at_point(self.viewer_center(), WHEEL_ZOOM_FACTOR);
    }

    /// One zoom step out, centered on the viewer midpoint
    pub fn zoom_out(&mut self) {
        self.zoom_at_point(self.viewer_center(), 1.0 / WHEEL_ZOOM_FACTOR);
    }

    // -------------------------------------------------------------------------
    // Pointer drag / click
    // -------------------------------------------------------------------------

    pub fn pointer_down(&mut self, pos: Point) {
        self.pointer = PointerGesture::Pressed {
            start: pos,
            pan_at_start: self.transform.pan,
        };
        self.refresh_cursor();
    }

    pub fn pointer_move(&mut self, pos: Point) {
        match self.pointer {
            PointerGesture::Idle => {}
            PointerGesture::Pressed {
                start,
                pan_at_start,
            } => {
                let dx = (pos.x - start.x).abs();
                let dy = (pos.y - start.y).abs();
                if dx >= PAN_THRESHOLD_PX || dy >= PAN_THRESHOLD_PX {
                    debug!("Press promoted to pan after {dx:.1}x{dy:.1}px");
                    self.pointer = PointerGesture::Panning {
                        start,
                        pan_at_start,
                    };
                    self.apply_pan(start, pan_at_start, pos);
                }
            }
            PointerGesture::Panning {
                start,
                pan_at_start,
            } => self.apply_pan(start, pan_at_start, pos),
        }
    }

    /// Finish the press. A press that never panned, released with the
    /// comment tool active, becomes a canvas click; a pan suppresses
    /// the click.
    pub fn pointer_up(&mut self, pos: Point) -> Option<CanvasClick> {
        let was_click = matches!(self.pointer, PointerGesture::Pressed { .. });
        self.pointer = PointerGesture::Idle;
        self.refresh_cursor();

        if was_click && (self.tool_provider)() == ToolMode::Comment {
            Some(CanvasClick { x: pos.x, y: pos.y })
        } else {
            None
        }
    }

    fn apply_pan(&mut self, start: Point, pan_at_start: Point, pos: Point) {
        // Screen delta divided by zoom: pan lives in document units
        let zoom = self.transform.zoom;
        let pan = Point::new(
            pan_at_start.x + (pos.x - start.x) / zoom,
            pan_at_start.y + (pos.y - start.y) / zoom,
        );
        self.set_transform(TransformState { zoom, pan });
    }

    // -------------------------------------------------------------------------
    // Touch
    // -------------------------------------------------------------------------

    /// Touch points went down. Two points arm the pinch baseline; a
    /// single point degrades to the pointer path.
    pub fn touch_start(&mut self, touches: &[Point]) {
        if touches.len() == 2 {
            self.pinch_distance = Some(touches[0].distance_to(touches[1]));
        } else if touches.len() == 1 {
            self.pointer_down(touches[0]);
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        if touches.len() == 2 {
            let new_distance = touches[0].distance_to(touches[1]);
            let Some(last_distance) = self.pinch_distance else {
                // Missed the start event; establish the baseline now
                self.pinch_distance = Some(new_distance);
                return;
            };
            self.pinch_distance = Some(new_distance);
            if last_distance <= 0.0 {
                // Coincident touch points: no meaningful factor
                return;
            }
            let factor = new_distance / last_distance;
            self.pinch_zoom(touches[0].midpoint(touches[1]), factor);
        } else if touches.len() == 1 {
            self.pointer_move(touches[0]);
        }
    }

    /// Touch points lifted. `remaining` are the points still down,
    /// `released` is where the last lifted point was.
    pub fn touch_end(&mut self, remaining: &[Point], released: Point) -> Option<CanvasClick> {
        if remaining.len() < 2 {
            self.pinch_distance = None;
        }
        if remaining.is_empty() {
            self.pointer_up(released)
        } else {
            None
        }
    }

    /// Incremental pinch zoom around the touch midpoint. Unlike the
    /// wheel path the factor is relative (new/last distance), and the
    /// midpoint is held fixed by correcting pan proportionally to the
    /// zoom ratio.
    fn pinch_zoom(&mut self, center: Point, factor: f32) {
        let old_zoom = self.transform.zoom;
        let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new_zoom / old_zoom - 1.0;

        let pan = self.transform.pan;
        let pan = Point::new(
            pan.x - (center.x - pan.x) * ratio,
            pan.y - (center.y - pan.y) * ratio,
        );
        self.set_transform(TransformState {
            zoom: new_zoom,
            pan,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TestSurface {
        cursor: CursorIcon,
        size: (f32, f32),
    }

    impl TestSurface {
        fn new() -> Self {
            Self {
                cursor: CursorIcon::Default,
                size: (800.0, 600.0),
            }
        }
    }

    impl InputSurface for TestSurface {
        fn set_cursor(&mut self, cursor: CursorIcon) {
            self.cursor = cursor;
        }
        fn viewer_size(&self) -> (f32, f32) {
            self.size
        }
    }

    type Notifications = Rc<RefCell<Vec<TransformState>>>;

    fn make_controller(
        tool: ToolMode,
    ) -> (ViewportController<TestSurface>, Notifications) {
        let notifications: Notifications = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notifications);
        let controller = ViewportController::new(
            TestSurface::new(),
            Box::new(move |t| sink.borrow_mut().push(t)),
            Box::new(move || tool),
        );
        (controller, notifications)
    }

    #[test]
    fn test_wheel_zoom_to_point_invariant() {
        let (mut c, _) = make_controller(ToolMode::Pan);
        let cursor = Point::new(123.0, 77.0);

        for delta in [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0] {
            let before = c.transform();
            let fixed_x = cursor.x / before.zoom - before.pan.x;
            let fixed_y = cursor.y / before.zoom - before.pan.y;

            c.wheel(cursor, delta);

            let after = c.transform();
            assert!((cursor.x / after.zoom - after.pan.x - fixed_x).abs() < 1e-3);
            assert!((cursor.y / after.zoom - after.pan.y - fixed_y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zoom_clamps_and_stops_notifying_at_bound() {
        let (mut c, notifications) = make_controller(ToolMode::Pan);

        for _ in 0..100 {
            c.zoom_in();
        }
        assert_eq!(c.transform().zoom, MAX_ZOOM);

        let count_at_bound = notifications.borrow().len();
        c.zoom_in();
        assert_eq!(notifications.borrow().len(), count_at_bound);

        for _ in 0..100 {
            c.zoom_out();
        }
        assert_eq!(c.transform().zoom, MIN_ZOOM);
        let count_at_floor = notifications.borrow().len();
        c.zoom_out();
        assert_eq!(notifications.borrow().len(), count_at_floor);
    }

    #[test]
    fn test_zoom_at_bound_is_silent_for_off_center_cursors() {
        let (mut c, notifications) = make_controller(ToolMode::Pan);

        // Reach the ceiling with a pan in place so the zoom-to-point
        // arithmetic has non-trivial inputs
        c.pointer_down(Point::new(100.0, 100.0));
        c.pointer_move(Point::new(137.0, 61.0));
        c.pointer_up(Point::new(137.0, 61.0));
        for _ in 0..100 {
            c.wheel(Point::new(313.0, 247.0), -1.0);
        }
        assert_eq!(c.transform().zoom, MAX_ZOOM);

        let count_at_bound = notifications.borrow().len();
        for i in 0..500 {
            let cursor = Point::new(1.3 + 1.7 * i as f32, 700.0 - 1.1 * i as f32);
            c.wheel(cursor, -1.0);
        }
        assert_eq!(notifications.borrow().len(), count_at_bound);
    }

    #[test]
    fn test_click_below_threshold_with_comment_tool() {
        let (mut c, notifications) = make_controller(ToolMode::Comment);

        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(12.0, 13.0));
        let click = c.pointer_up(Point::new(12.0, 13.0));

        assert_eq!(click, Some(CanvasClick { x: 12.0, y: 13.0 }));
        assert!(notifications.borrow().is_empty());
    }

    #[test]
    fn test_drag_beyond_threshold_suppresses_click() {
        let (mut c, notifications) = make_controller(ToolMode::Comment);

        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(16.0, 10.0));
        let click = c.pointer_up(Point::new(16.0, 10.0));

        assert_eq!(click, None);
        assert!(!notifications.borrow().is_empty());
    }

    #[test]
    fn test_click_with_pan_tool_synthesizes_nothing() {
        let (mut c, _) = make_controller(ToolMode::Pan);
        c.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(c.pointer_up(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_pan_delta_divided_by_zoom() {
        let (mut c, _) = make_controller(ToolMode::Pan);

        // Zoom to 2x around the origin so pan stays (0,0)
        c.wheel(Point::new(0.0, 0.0), -1.0);
        while c.transform().zoom < 2.0 - 1e-3 {
            c.wheel(Point::new(0.0, 0.0), -1.0);
        }
        let zoom = c.transform().zoom;
        let pan_before = c.transform().pan;

        c.pointer_down(Point::new(100.0, 100.0));
        c.pointer_move(Point::new(140.0, 120.0));
        c.pointer_up(Point::new(140.0, 120.0));

        let pan = c.transform().pan;
        assert!((pan.x - (pan_before.x + 40.0 / zoom)).abs() < 1e-3);
        assert!((pan.y - (pan_before.y + 20.0 / zoom)).abs() < 1e-3);
    }

    #[test]
    fn test_pan_is_sticky_once_promoted() {
        let (mut c, notifications) = make_controller(ToolMode::Comment);

        c.pointer_down(Point::new(10.0, 10.0));
        c.pointer_move(Point::new(20.0, 10.0));
        // Back inside the threshold box: still panning
        c.pointer_move(Point::new(11.0, 10.0));
        let click = c.pointer_up(Point::new(11.0, 10.0));

        assert_eq!(click, None);
        assert!(notifications.borrow().len() >= 2);
    }

    #[test]
    fn test_reset_transform_notifies_unconditionally() {
        let (mut c, notifications) = make_controller(ToolMode::Pan);

        c.reset_transform();
        c.reset_transform();
        assert_eq!(notifications.borrow().len(), 2);
        assert_eq!(c.transform(), TransformState::default());

        c.zoom_in();
        c.reset_transform();
        assert_eq!(c.transform(), TransformState::default());
    }

    #[test]
    fn test_pinch_zoom_scales_by_distance_ratio() {
        let (mut c, _) = make_controller(ToolMode::Pan);

        c.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        c.touch_move(&[Point::new(75.0, 100.0), Point::new(225.0, 100.0)]);

        // Distance grew 100 -> 150
        assert!((c.transform().zoom - 1.5).abs() < 1e-4);

        // Second move is relative to the updated baseline
        c.touch_move(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        assert!((c.transform().zoom - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_pinch_holds_midpoint_fixed() {
        let (mut c, _) = make_controller(ToolMode::Pan);
        let center = Point::new(150.0, 100.0);

        c.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        c.touch_move(&[Point::new(50.0, 100.0), Point::new(250.0, 100.0)]);

        let t = c.transform();
        // pan' = pan - (center - pan) * (zoom'/zoom - 1) with pan 0, zoom 1->2
        assert!((t.zoom - 2.0).abs() < 1e-4);
        assert!((t.pan.x - (-center.x)).abs() < 1e-3);
        assert!((t.pan.y - (-center.y)).abs() < 1e-3);
    }

    #[test]
    fn test_pinch_zero_baseline_is_noop() {
        let (mut c, notifications) = make_controller(ToolMode::Pan);

        let p = Point::new(100.0, 100.0);
        c.touch_start(&[p, p]);
        c.touch_move(&[Point::new(90.0, 100.0), Point::new(110.0, 100.0)]);
        // First move only re-established the baseline
        assert!(notifications.borrow().is_empty());

        c.touch_move(&[Point::new(80.0, 100.0), Point::new(120.0, 100.0)]);
        assert!(c.transform().zoom > 1.0);
    }

    #[test]
    fn test_touch_end_clears_pinch_then_finishes_pointer() {
        let (mut c, _) = make_controller(ToolMode::Pan);

        c.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        c.touch_move(&[Point::new(90.0, 100.0), Point::new(210.0, 100.0)]);
        let zoom_after_pinch = c.transform().zoom;

        // One finger lifts: pinch baseline cleared, no click
        assert_eq!(c.touch_end(&[Point::new(90.0, 100.0)], Point::new(210.0, 100.0)), None);
        // Remaining finger moving must not pinch-zoom
        c.touch_move(&[Point::new(95.0, 100.0)]);
        assert_eq!(c.transform().zoom, zoom_after_pinch);

        assert_eq!(c.touch_end(&[], Point::new(95.0, 100.0)), None);
    }

    #[test]
    fn test_single_touch_degrades_to_pointer_drag() {
        let (mut c, notifications) = make_controller(ToolMode::Pan);

        c.touch_start(&[Point::new(10.0, 10.0)]);
        c.touch_move(&[Point::new(30.0, 10.0)]);
        c.touch_end(&[], Point::new(30.0, 10.0));

        assert!(!notifications.borrow().is_empty());
        assert!(c.transform().pan.x > 0.0);
    }

    #[test]
    fn test_cursor_feedback() {
        let (mut c, _) = make_controller(ToolMode::Pan);
        assert_eq!(c.surface().cursor, CursorIcon::Grab);

        c.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(c.surface().cursor, CursorIcon::Grabbing);

        c.pointer_up(Point::new(10.0, 10.0));
        assert_eq!(c.surface().cursor, CursorIcon::Grab);

        let (c, _) = make_controller(ToolMode::Comment);
        assert_eq!(c.surface().cursor, CursorIcon::Crosshair);
    }
}
