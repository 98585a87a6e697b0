use serde::{Deserialize, Serialize};

/// Static hand shape recognised in a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GestureLabel {
    /// No recognised shape.
    #[default]
    None,
    /// Only the index finger extended. Drives the cursor.
    PointingOnly,
    /// Index and middle extended, ring and pinky curled.
    TwoFingers,
    /// All five fingers extended.
    OpenPalm,
    /// Thumb and index tips touching, remaining fingers extended.
    OkSign,
    /// Thumb and index spread in an L/V shape, remaining fingers curled.
    PinchLv,
}

impl GestureLabel {
    /// Short human-readable name for logs and tooltips.
    pub fn name(&self) -> &'static str {
        match self {
            GestureLabel::None => "none",
            GestureLabel::PointingOnly => "pointing",
            GestureLabel::TwoFingers => "two-fingers",
            GestureLabel::OpenPalm => "open-palm",
            GestureLabel::OkSign => "ok-sign",
            GestureLabel::PinchLv => "pinch-lv",
        }
    }
}
