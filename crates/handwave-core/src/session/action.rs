/// Keys the state machine can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Alt (Option on macOS).
    Alt,
    /// Tab.
    Tab,
    /// Space bar.
    Space,
    /// Left arrow.
    LeftArrow,
    /// Right arrow.
    RightArrow,
}

/// Mouse buttons the state machine can click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
}

/// Scroll direction as seen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Content moves down, view moves up.
    Up,
    /// Content moves up, view moves down.
    Down,
}

/// A single synthetic input event.
///
/// Events are consumed by the injector in the frame they are produced and are
/// never buffered across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    /// Press and hold a key.
    KeyDown(Key),
    /// Release a key.
    KeyUp(Key),
    /// Relative cursor movement in pixels.
    MouseMove {
        /// Horizontal delta, positive to the right.
        dx: i32,
        /// Vertical delta, positive downwards.
        dy: i32,
    },
    /// Press and release a mouse button.
    MouseClick(MouseButton),
    /// Scroll by `magnitude` notches.
    ScrollTick {
        /// Scroll direction.
        direction: ScrollDirection,
        /// Number of notches, always at least one.
        magnitude: u32,
    },
}

/// Events produced by one state machine step, in emission order.
pub type Actions = std::vec::IntoIter<ActionEvent>;
