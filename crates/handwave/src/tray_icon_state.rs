use handwave_core::Mode;

/// Tray indicator states, one per gesture mode plus paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Watching for gestures.
    Idle,
    /// Index finger drives the cursor.
    MouseControl,
    /// Task switcher open, Alt held.
    AltTab,
    /// Pinch scrolling.
    Scroll,
    /// Gesture control suspended from the tray menu.
    Paused,
}

impl From<Mode> for TrayIconState {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Idle => TrayIconState::Idle,
            Mode::MouseControl => TrayIconState::MouseControl,
            Mode::AltTabHold => TrayIconState::AltTab,
            Mode::ScrollMode => TrayIconState::Scroll,
        }
    }
}

impl TrayIconState {
    /// Fill colour of the generated icon, RGBA.
    pub fn colour(self) -> [u8; 4] {
        match self {
            TrayIconState::Idle => [0x8a, 0x8f, 0x98, 0xff],
            TrayIconState::MouseControl => [0x2f, 0x80, 0xed, 0xff],
            TrayIconState::AltTab => [0xf2, 0x99, 0x4a, 0xff],
            TrayIconState::Scroll => [0x27, 0xae, 0x60, 0xff],
            TrayIconState::Paused => [0xeb, 0x57, 0x57, 0xff],
        }
    }

    /// Tooltip shown while in this state.
    pub fn tooltip(self) -> &'static str {
        match self {
            TrayIconState::Idle => "Handwave - Watching",
            TrayIconState::MouseControl => "Handwave - Mouse control",
            TrayIconState::AltTab => "Handwave - Task switcher",
            TrayIconState::Scroll => "Handwave - Scrolling",
            TrayIconState::Paused => "Handwave - Paused",
        }
    }
}
