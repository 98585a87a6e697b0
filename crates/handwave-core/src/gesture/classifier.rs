//! Per-frame hand shape classification.
//!
//! Every predicate reads only the landmarks of one hand, so the result is a
//! pure function of the record and the tuning. Predicates are checked most
//! specific first and the first match wins.

use crate::{ClassifierTuning, GestureLabel, HandRecord, landmarks};

/// The five fingers, thumb first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Pinky.
    Pinky,
}

impl Finger {
    /// All fingers in anatomical order.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Fingertip landmark index.
    pub fn tip(self) -> usize {
        match self {
            Finger::Thumb => landmarks::THUMB_TIP,
            Finger::Index => landmarks::INDEX_FINGER_TIP,
            Finger::Middle => landmarks::MIDDLE_FINGER_TIP,
            Finger::Ring => landmarks::RING_FINGER_TIP,
            Finger::Pinky => landmarks::PINKY_TIP,
        }
    }

    /// Middle joint compared against the tip: IP for the thumb, PIP otherwise.
    pub fn joint(self) -> usize {
        match self {
            Finger::Thumb => landmarks::THUMB_IP,
            Finger::Index => landmarks::INDEX_FINGER_PIP,
            Finger::Middle => landmarks::MIDDLE_FINGER_PIP,
            Finger::Ring => landmarks::RING_FINGER_PIP,
            Finger::Pinky => landmarks::PINKY_PIP,
        }
    }

    /// Lowercase name, matching the configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

/// Extended/curled state of every finger of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerStates {
    /// Thumb extended.
    pub thumb: bool,
    /// Index extended.
    pub index: bool,
    /// Middle extended.
    pub middle: bool,
    /// Ring extended.
    pub ring: bool,
    /// Pinky extended.
    pub pinky: bool,
}

impl FingerStates {
    /// Measure every finger of `hand`.
    pub fn measure(hand: &HandRecord, tuning: &ClassifierTuning) -> Self {
        Self {
            thumb: is_extended(hand, Finger::Thumb, tuning),
            index: is_extended(hand, Finger::Index, tuning),
            middle: is_extended(hand, Finger::Middle, tuning),
            ring: is_extended(hand, Finger::Ring, tuning),
            pinky: is_extended(hand, Finger::Pinky, tuning),
        }
    }

    fn outer_three_extended(&self) -> bool {
        self.middle && self.ring && self.pinky
    }

    fn outer_three_curled(&self) -> bool {
        !self.middle && !self.ring && !self.pinky
    }
}

/// Whether `finger` reaches further from the palm center than its middle joint.
pub fn is_extended(hand: &HandRecord, finger: Finger, tuning: &ClassifierTuning) -> bool {
    let palm = hand.point(landmarks::PALM_CENTER);
    let tip = hand.point(finger.tip()).distance_2d(&palm);
    let joint = hand.point(finger.joint()).distance_2d(&palm);

    tip > joint * tuning.extension_thresholds.for_finger(finger)
}

/// Map one hand to a single gesture label.
///
/// Priority: OK sign, open palm, two fingers, pointing, L/V pinch, none.
pub fn classify(hand: &HandRecord, tuning: &ClassifierTuning) -> GestureLabel {
    let fingers = FingerStates::measure(hand, tuning);

    if is_ok_sign(hand, &fingers, tuning) {
        GestureLabel::OkSign
    } else if fingers.thumb && fingers.index && fingers.outer_three_extended() {
        GestureLabel::OpenPalm
    } else if fingers.index && fingers.middle && !fingers.ring && !fingers.pinky {
        GestureLabel::TwoFingers
    } else if fingers.index && !fingers.thumb && fingers.outer_three_curled() {
        GestureLabel::PointingOnly
    } else if is_pinch_lv(hand, &fingers, tuning) {
        GestureLabel::PinchLv
    } else {
        GestureLabel::None
    }
}

fn is_ok_sign(hand: &HandRecord, fingers: &FingerStates, tuning: &ClassifierTuning) -> bool {
    let thumb_tip = hand.point(landmarks::THUMB_TIP);
    let index_tip = hand.point(landmarks::INDEX_FINGER_TIP);

    thumb_tip.distance_3d(&index_tip) < tuning.ok_touch_distance
        && fingers.outer_three_extended()
}

fn is_pinch_lv(hand: &HandRecord, fingers: &FingerStates, tuning: &ClassifierTuning) -> bool {
    if !(fingers.thumb && fingers.index && fingers.outer_three_curled()) {
        return false;
    }

    let wrist = hand.wrist();
    let thumb_tip = hand.point(landmarks::THUMB_TIP);
    let index_tip = hand.point(landmarks::INDEX_FINGER_TIP);

    let angle = opening_angle_deg(
        (thumb_tip.x - wrist.x, thumb_tip.y - wrist.y),
        (index_tip.x - wrist.x, index_tip.y - wrist.y),
    );

    angle > tuning.pinch_min_angle_deg
        && angle < tuning.pinch_max_angle_deg
        && thumb_tip.distance_2d(&index_tip) > tuning.pinch_min_separation
}

/// Angle between two vectors in degrees; 0 when either is degenerate.
fn opening_angle_deg(a: (f32, f32), b: (f32, f32)) -> f32 {
    let len_a = (a.0 * a.0 + a.1 * a.1).sqrt();
    let len_b = (b.0 * b.0 + b.1 * b.1).sqrt();
    if len_a <= f32::EPSILON || len_b <= f32::EPSILON {
        return 0.0;
    }

    let cos = ((a.0 * b.0 + a.1 * b.1) / (len_a * len_b)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
