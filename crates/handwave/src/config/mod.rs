#[allow(clippy::module_inception)]
mod config;
mod controls_config;
mod detector_config;

pub(crate) use {config::Config, controls_config::ControlsConfig, detector_config::DetectorConfig};

pub(crate) const DEFAULT_MIN_HAND_SCORE: f32 = 0.5;
pub(crate) const DEFAULT_MAX_HANDS: usize = 2;
pub(crate) const DEFAULT_QUIT_HOTKEY: &str = "CTRL+SHIFT+KeyQ";

pub(crate) fn default_min_hand_score() -> f32 {
    DEFAULT_MIN_HAND_SCORE
}

pub(crate) fn default_max_hands() -> usize {
    DEFAULT_MAX_HANDS
}

pub(crate) fn default_quit_hotkey() -> String {
    DEFAULT_QUIT_HOTKEY.to_string()
}
