use crate::{
    ClassifierTuning, CoreResult,
    gesture::invalid,
    session::{
        DEFAULT_ALT_TRIGGER_DISPLACEMENT, DEFAULT_DEBOUNCE_FRAMES, DEFAULT_FRAME_RATE,
        DEFAULT_MOUSE_SENSITIVITY, DEFAULT_MOUSE_SMOOTHING, DEFAULT_NAVIGATION_CENTER_LINE,
        DEFAULT_NAVIGATION_COOLDOWN_FRAMES, DEFAULT_PINCH_SCROLL_RATE_LIMIT_MS,
        DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_SCROLL_UNIT,
        default_alt_trigger_displacement, default_debounce_frames, default_frame_rate,
        default_mouse_sensitivity, default_mouse_smoothing, default_navigation_center_line,
        default_navigation_cooldown_frames, default_pinch_scroll_rate_limit_ms,
        default_screen_height, default_screen_width, default_scroll_unit,
    },
};

use serde::{Deserialize, Serialize};

/// Every tunable number used by the state machine and classifier.
///
/// Deserializes from the `[gestures]` table of the configuration file; any
/// missing key falls back to its default. Counters are in frames so a replay
/// of the same landmark stream always yields the same events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureTuning {
    /// Consecutive frames a gesture (or hand absence) must hold before a mode
    /// changes.
    #[serde(default = "default_debounce_frames")]
    pub debounce_frames: u32,

    /// Multiplier applied to fingertip movement before it reaches the cursor.
    #[serde(default = "default_mouse_sensitivity")]
    pub mouse_sensitivity: f32,

    /// Exponential smoothing of cursor deltas, `0.0` disables it.
    #[serde(default = "default_mouse_smoothing")]
    pub mouse_smoothing: f32,

    /// Screen width in pixels that a full-width finger sweep maps to.
    #[serde(default = "default_screen_width")]
    pub screen_width: u32,

    /// Screen height in pixels that a full-height finger sweep maps to.
    #[serde(default = "default_screen_height")]
    pub screen_height: u32,

    /// Upward wrist travel (normalized) needed to open the task switcher.
    #[serde(default = "default_alt_trigger_displacement")]
    pub alt_trigger_displacement: f32,

    /// Minimum time between two scroll ticks.
    #[serde(default = "default_pinch_scroll_rate_limit_ms")]
    pub pinch_scroll_rate_limit_ms: u64,

    /// Nominal camera frame rate used to turn milliseconds into frames.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Vertical pinch travel (normalized) per scroll notch.
    #[serde(default = "default_scroll_unit")]
    pub scroll_unit: f32,

    /// Normalized x coordinate splitting left-arrow from right-arrow.
    #[serde(default = "default_navigation_center_line")]
    pub navigation_center_line: f32,

    /// Frames after an arrow key before another may fire.
    #[serde(default = "default_navigation_cooldown_frames")]
    pub navigation_cooldown_frames: u32,

    /// Hand shape thresholds.
    #[serde(default)]
    pub classifier: ClassifierTuning,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            debounce_frames: DEFAULT_DEBOUNCE_FRAMES,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            mouse_smoothing: DEFAULT_MOUSE_SMOOTHING,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            alt_trigger_displacement: DEFAULT_ALT_TRIGGER_DISPLACEMENT,
            pinch_scroll_rate_limit_ms: DEFAULT_PINCH_SCROLL_RATE_LIMIT_MS,
            frame_rate: DEFAULT_FRAME_RATE,
            scroll_unit: DEFAULT_SCROLL_UNIT,
            navigation_center_line: DEFAULT_NAVIGATION_CENTER_LINE,
            navigation_cooldown_frames: DEFAULT_NAVIGATION_COOLDOWN_FRAMES,
            classifier: ClassifierTuning::default(),
        }
    }
}

impl GestureTuning {
    /// Check every value once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidTuning`](crate::GestureError::InvalidTuning)
    /// naming the first value out of range.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.debounce_frames == 0 {
            return Err(invalid("debounce_frames must be at least 1".to_string()));
        }

        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            return Err(invalid(format!(
                "mouse_sensitivity must be positive, got {}",
                self.mouse_sensitivity
            )));
        }

        if !(0.0..1.0).contains(&self.mouse_smoothing) {
            return Err(invalid(format!(
                "mouse_smoothing must be in [0, 1), got {}",
                self.mouse_smoothing
            )));
        }

        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(invalid(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }

        if !(self.alt_trigger_displacement.is_finite() && self.alt_trigger_displacement > 0.0) {
            return Err(invalid(format!(
                "alt_trigger_displacement must be positive, got {}",
                self.alt_trigger_displacement
            )));
        }

        if self.frame_rate == 0 {
            return Err(invalid("frame_rate must be at least 1".to_string()));
        }

        if !(self.scroll_unit.is_finite() && self.scroll_unit > 0.0) {
            return Err(invalid(format!(
                "scroll_unit must be positive, got {}",
                self.scroll_unit
            )));
        }

        if !(self.navigation_center_line > 0.0 && self.navigation_center_line < 1.0) {
            return Err(invalid(format!(
                "navigation_center_line must be inside (0, 1), got {}",
                self.navigation_center_line
            )));
        }

        self.classifier.validate()
    }

    /// Scroll rate limit expressed in frames, never less than one.
    pub fn scroll_interval_frames(&self) -> u32 {
        let frames = self
            .pinch_scroll_rate_limit_ms
            .saturating_mul(u64::from(self.frame_rate))
            .div_ceil(1000);
        u32::try_from(frames).unwrap_or(u32::MAX).max(1)
    }
}
