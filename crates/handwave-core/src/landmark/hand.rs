use crate::{CoreResult, GestureError, LandmarkPoint};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Number of landmarks in a MediaPipe hand record.
pub const LANDMARK_COUNT: usize = 21;

/// MediaPipe hand landmark indices.
///
/// Wrist first, then four landmarks per finger from thumb to pinky, each
/// ordered base to tip.
pub mod landmarks {
    #![allow(missing_docs)]

    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    /// Landmark used as the palm center for extension tests.
    pub const PALM_CENTER: usize = MIDDLE_FINGER_MCP;
}

/// Which hand the detector believes it saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    /// Left hand.
    Left,
    /// Right hand.
    Right,
}

impl Handedness {
    /// Parse a detector label, case-insensitively. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("left") {
            Some(Self::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// One detected hand: exactly [`LANDMARK_COUNT`] points plus handedness.
#[derive(Debug, Clone, PartialEq)]
pub struct HandRecord {
    points: [LandmarkPoint; LANDMARK_COUNT],
    handedness: Handedness,
}

impl HandRecord {
    /// Validate and build a record from detector output.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::MalformedHand`] when the slice does not hold
    /// exactly 21 points, and [`GestureError::InvalidLandmark`] when a
    /// coordinate is not finite.
    #[track_caller]
    pub fn new(points: &[LandmarkPoint], handedness: Handedness) -> CoreResult<Self> {
        let points: [LandmarkPoint; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| GestureError::MalformedHand {
                    expected: LANDMARK_COUNT,
                    actual: points.len(),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GestureError::InvalidLandmark {
                index,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { points, handedness })
    }

    /// Landmark at a MediaPipe index (see [`landmarks`]).
    ///
    /// Indices at or above 21 clamp to the last landmark.
    pub fn point(&self, index: usize) -> LandmarkPoint {
        self.points[index.min(LANDMARK_COUNT - 1)]
    }

    /// All 21 landmarks in anatomical order.
    pub fn points(&self) -> &[LandmarkPoint; LANDMARK_COUNT] {
        &self.points
    }

    /// Detector handedness label.
    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Wrist landmark.
    pub fn wrist(&self) -> LandmarkPoint {
        self.points[landmarks::WRIST]
    }

    /// Index fingertip, the cursor-driving landmark.
    pub fn index_tip(&self) -> LandmarkPoint {
        self.points[landmarks::INDEX_FINGER_TIP]
    }

    /// Midpoint between thumb and index tips.
    pub fn pinch_midpoint(&self) -> LandmarkPoint {
        self.points[landmarks::THUMB_TIP].midpoint(&self.points[landmarks::INDEX_FINGER_TIP])
    }

    /// Midpoint between index and middle tips.
    pub fn two_finger_midpoint(&self) -> LandmarkPoint {
        self.points[landmarks::INDEX_FINGER_TIP]
            .midpoint(&self.points[landmarks::MIDDLE_FINGER_TIP])
    }
}
