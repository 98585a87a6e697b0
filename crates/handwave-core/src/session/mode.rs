use crate::GestureLabel;

/// Exclusive interaction mode of a [`GestureSession`](crate::GestureSession).
///
/// Only one mode is active at a time, so a held Alt and cursor control can
/// never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Waiting for a gesture. Arrow-key navigation fires from here.
    Idle,
    /// Index finger drives the cursor.
    MouseControl,
    /// Alt is held and the task switcher is open.
    AltTabHold,
    /// Pinch movement scrolls.
    ScrollMode,
}

impl Mode {
    /// Gesture that keeps this mode alive, if any.
    pub fn sustaining_gesture(&self) -> Option<GestureLabel> {
        match self {
            Mode::Idle | Mode::AltTabHold => None,
            Mode::MouseControl => Some(GestureLabel::PointingOnly),
            Mode::ScrollMode => Some(GestureLabel::PinchLv),
        }
    }

    /// Short human-readable name for logs and tooltips.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::MouseControl => "mouse-control",
            Mode::AltTabHold => "alt-tab",
            Mode::ScrollMode => "scroll",
        }
    }
}
