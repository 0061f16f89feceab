use super::transform::Point;

/// Keys the viewer reacts to, parsed from DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    ZoomIn,
    ZoomOut,
    Reset,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl ViewerKey {
    pub fn from_key(key: &str) -> Self {
        match key {
            "+" | "=" => ViewerKey::ZoomIn,
            "-" => ViewerKey::ZoomOut,
            "0" => ViewerKey::Reset,
            "ArrowUp" => ViewerKey::ArrowUp,
            "ArrowDown" => ViewerKey::ArrowDown,
            "ArrowLeft" => ViewerKey::ArrowLeft,
            "ArrowRight" => ViewerKey::ArrowRight,
            _ => ViewerKey::Other,
        }
    }
}

/// A wheel event in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    /// Positive scrolls the page down.
    pub delta_y: f64,
    pub position: Point,
    /// Ctrl (or Cmd) held.
    pub zoom_modifier: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewerInput {
    Wheel(WheelInput),
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerEnter,
    PointerLeave,
    /// Active touches after the event.
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    /// Touches still on the surface after one lifted.
    TouchEnd(Vec<Point>),
    Key(ViewerKey),
    ZoomInButton,
    ZoomOutButton,
    ResetButton,
    Resize { width: f64, height: f64 },
    FullscreenChanged(bool),
}

/// What the host should do with the native event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Let the browser run its default action (page scroll, ...).
    PassThrough,
    /// The viewer used the event; prevent the default action.
    Handled,
    /// A press and release without movement.
    Click(Point),
}

impl InputOutcome {
    pub fn prevents_default(self) -> bool {
        !matches!(self, InputOutcome::PassThrough)
    }
}
