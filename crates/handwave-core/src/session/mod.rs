mod action;
mod mode;
#[allow(clippy::module_inception)]
mod session;
mod tuning;

pub use {
    action::{ActionEvent, Actions, Key, MouseButton, ScrollDirection},
    mode::Mode,
    session::GestureSession,
    tuning::GestureTuning,
};

pub(crate) const DEFAULT_DEBOUNCE_FRAMES: u32 = 3;
pub(crate) const DEFAULT_MOUSE_SENSITIVITY: f32 = 1.1;
pub(crate) const DEFAULT_MOUSE_SMOOTHING: f32 = 0.5;
pub(crate) const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub(crate) const DEFAULT_SCREEN_HEIGHT: u32 = 1080;
pub(crate) const DEFAULT_ALT_TRIGGER_DISPLACEMENT: f32 = 0.04;
pub(crate) const DEFAULT_PINCH_SCROLL_RATE_LIMIT_MS: u64 = 100;
pub(crate) const DEFAULT_FRAME_RATE: u32 = 30;
pub(crate) const DEFAULT_SCROLL_UNIT: f32 = 0.04;
pub(crate) const DEFAULT_NAVIGATION_CENTER_LINE: f32 = 0.5;
pub(crate) const DEFAULT_NAVIGATION_COOLDOWN_FRAMES: u32 = 15;

pub(crate) fn default_debounce_frames() -> u32 {
    DEFAULT_DEBOUNCE_FRAMES
}

pub(crate) fn default_mouse_sensitivity() -> f32 {
    DEFAULT_MOUSE_SENSITIVITY
}

pub(crate) fn default_mouse_smoothing() -> f32 {
    DEFAULT_MOUSE_SMOOTHING
}

pub(crate) fn default_screen_width() -> u32 {
    DEFAULT_SCREEN_WIDTH
}

pub(crate) fn default_screen_height() -> u32 {
    DEFAULT_SCREEN_HEIGHT
}

pub(crate) fn default_alt_trigger_displacement() -> f32 {
    DEFAULT_ALT_TRIGGER_DISPLACEMENT
}

pub(crate) fn default_pinch_scroll_rate_limit_ms() -> u64 {
    DEFAULT_PINCH_SCROLL_RATE_LIMIT_MS
}

pub(crate) fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

pub(crate) fn default_scroll_unit() -> f32 {
    DEFAULT_SCROLL_UNIT
}

pub(crate) fn default_navigation_center_line() -> f32 {
    DEFAULT_NAVIGATION_CENTER_LINE
}

pub(crate) fn default_navigation_cooldown_frames() -> u32 {
    DEFAULT_NAVIGATION_COOLDOWN_FRAMES
}
