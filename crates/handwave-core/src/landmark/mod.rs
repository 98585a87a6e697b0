mod frame;
mod hand;
mod point;

pub use {
    frame::{FrameSnapshot, LabeledHand},
    hand::{HandRecord, Handedness, LANDMARK_COUNT, landmarks},
    point::LandmarkPoint,
};
