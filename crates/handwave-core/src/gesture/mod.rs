mod classifier;
mod label;
mod tuning;

pub(crate) use tuning::invalid;

pub use {
    classifier::{Finger, FingerStates, classify, is_extended},
    label::GestureLabel,
    tuning::{ClassifierTuning, ExtensionThresholds},
};

pub(crate) const DEFAULT_EXTENSION_RATIO: f32 = 1.0;
pub(crate) const DEFAULT_INDEX_EXTENSION_RATIO: f32 = 0.9;
pub(crate) const DEFAULT_OK_TOUCH_DISTANCE: f32 = 0.05;
pub(crate) const DEFAULT_PINCH_MIN_ANGLE_DEG: f32 = 20.0;
pub(crate) const DEFAULT_PINCH_MAX_ANGLE_DEG: f32 = 120.0;
pub(crate) const DEFAULT_PINCH_MIN_SEPARATION: f32 = 0.05;

pub(crate) fn default_extension_ratio() -> f32 {
    DEFAULT_EXTENSION_RATIO
}

pub(crate) fn default_index_extension_ratio() -> f32 {
    DEFAULT_INDEX_EXTENSION_RATIO
}

pub(crate) fn default_ok_touch_distance() -> f32 {
    DEFAULT_OK_TOUCH_DISTANCE
}

pub(crate) fn default_pinch_min_angle_deg() -> f32 {
    DEFAULT_PINCH_MIN_ANGLE_DEG
}

pub(crate) fn default_pinch_max_angle_deg() -> f32 {
    DEFAULT_PINCH_MAX_ANGLE_DEG
}

pub(crate) fn default_pinch_min_separation() -> f32 {
    DEFAULT_PINCH_MIN_SEPARATION
}
