use crate::{
    CoreResult, GestureError,
    gesture::{
        DEFAULT_EXTENSION_RATIO, DEFAULT_INDEX_EXTENSION_RATIO, DEFAULT_OK_TOUCH_DISTANCE,
        DEFAULT_PINCH_MAX_ANGLE_DEG, DEFAULT_PINCH_MIN_ANGLE_DEG, DEFAULT_PINCH_MIN_SEPARATION,
        Finger, default_extension_ratio, default_index_extension_ratio, default_ok_touch_distance,
        default_pinch_max_angle_deg, default_pinch_min_angle_deg, default_pinch_min_separation,
    },
};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Per-finger extension ratios.
///
/// A finger counts as extended when its tip is further from the palm center
/// than its middle joint, multiplied by the finger's ratio. Ratios below 1.0
/// make a finger easier to read as extended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtensionThresholds {
    /// Thumb ratio (tip vs IP joint).
    #[serde(default = "default_extension_ratio")]
    pub thumb: f32,
    /// Index ratio (tip vs PIP joint).
    #[serde(default = "default_index_extension_ratio")]
    pub index: f32,
    /// Middle finger ratio.
    #[serde(default = "default_extension_ratio")]
    pub middle: f32,
    /// Ring finger ratio.
    #[serde(default = "default_extension_ratio")]
    pub ring: f32,
    /// Pinky ratio.
    #[serde(default = "default_extension_ratio")]
    pub pinky: f32,
}

impl ExtensionThresholds {
    /// Ratio for one finger.
    pub fn for_finger(&self, finger: Finger) -> f32 {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }
}

impl Default for ExtensionThresholds {
    fn default() -> Self {
        Self {
            thumb: DEFAULT_EXTENSION_RATIO,
            index: DEFAULT_INDEX_EXTENSION_RATIO,
            middle: DEFAULT_EXTENSION_RATIO,
            ring: DEFAULT_EXTENSION_RATIO,
            pinky: DEFAULT_EXTENSION_RATIO,
        }
    }
}

/// Geometric thresholds used by [`classify`](crate::classify).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierTuning {
    /// Per-finger extension ratios.
    #[serde(default)]
    pub extension_thresholds: ExtensionThresholds,

    /// Maximum thumb-tip to index-tip distance (normalized, 3D) for an OK sign.
    #[serde(default = "default_ok_touch_distance")]
    pub ok_touch_distance: f32,

    /// Smallest wrist-relative thumb/index angle accepted as an L/V pinch.
    #[serde(default = "default_pinch_min_angle_deg")]
    pub pinch_min_angle_deg: f32,

    /// Largest wrist-relative thumb/index angle accepted as an L/V pinch.
    #[serde(default = "default_pinch_max_angle_deg")]
    pub pinch_max_angle_deg: f32,

    /// Minimum thumb-tip to index-tip separation for an L/V pinch.
    #[serde(default = "default_pinch_min_separation")]
    pub pinch_min_separation: f32,
}

impl Default for ClassifierTuning {
    fn default() -> Self {
        Self {
            extension_thresholds: ExtensionThresholds::default(),
            ok_touch_distance: DEFAULT_OK_TOUCH_DISTANCE,
            pinch_min_angle_deg: DEFAULT_PINCH_MIN_ANGLE_DEG,
            pinch_max_angle_deg: DEFAULT_PINCH_MAX_ANGLE_DEG,
            pinch_min_separation: DEFAULT_PINCH_MIN_SEPARATION,
        }
    }
}

impl ClassifierTuning {
    /// Reject thresholds that would make the classifier meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidTuning`] naming the first bad value.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        for finger in Finger::ALL {
            let ratio = self.extension_thresholds.for_finger(finger);
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(invalid(format!(
                    "extension_thresholds.{} must be a positive number, got {}",
                    finger.name(),
                    ratio
                )));
            }
        }

        if !(self.ok_touch_distance.is_finite() && self.ok_touch_distance > 0.0) {
            return Err(invalid(format!(
                "ok_touch_distance must be positive, got {}",
                self.ok_touch_distance
            )));
        }

        let angles_ok = self.pinch_min_angle_deg.is_finite()
            && self.pinch_max_angle_deg.is_finite()
            && self.pinch_min_angle_deg >= 0.0
            && self.pinch_max_angle_deg <= 180.0
            && self.pinch_min_angle_deg < self.pinch_max_angle_deg;
        if !angles_ok {
            return Err(invalid(format!(
                "pinch angle range must satisfy 0 <= min < max <= 180, got {}..{}",
                self.pinch_min_angle_deg, self.pinch_max_angle_deg
            )));
        }

        if !(self.pinch_min_separation.is_finite() && self.pinch_min_separation >= 0.0) {
            return Err(invalid(format!(
                "pinch_min_separation must not be negative, got {}",
                self.pinch_min_separation
            )));
        }

        Ok(())
    }
}

#[track_caller]
pub(crate) fn invalid(reason: String) -> GestureError {
    GestureError::InvalidTuning {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
