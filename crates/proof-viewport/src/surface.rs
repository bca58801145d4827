//! Input surface capability
//!
//! The controller never touches a window or document directly; the host
//! supplies this small adapter so the controller stays testable
//! headlessly.

/// Active viewer tool, selected by the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    /// Drag to pan; clicks do nothing
    #[default]
    Pan,
    /// Clicks place annotations; cursor is a crosshair
    Comment,
}

/// Cursor feedback the controller requests from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Grab,
    Grabbing,
    Crosshair,
}

/// Host-provided surface the controller receives input through.
///
/// `viewer_size` is the viewer's current width/height in screen pixels,
/// used to center the synthetic wheel events behind the zoom buttons.
pub trait InputSurface {
    fn set_cursor(&mut self, cursor: CursorIcon);
    fn viewer_size(&self) -> (f32, f32);
}
