//! Handwave Core Library
//!
//! Turns per-frame hand landmarks from a MediaPipe-style detector into
//! debounced keyboard and mouse events. Nothing here touches the OS: the
//! caller feeds [`FrameSnapshot`]s in and forwards the returned
//! [`ActionEvent`]s to an input injector.
//!
//! # Example
//!
//! ```no_run
//! use handwave_core::{CoreResult, FrameSnapshot, GestureSession, GestureTuning, HandRecord};
//!
//! fn run(frames: Vec<Vec<HandRecord>>) -> CoreResult<()> {
//!     let tuning = GestureTuning::default();
//!     let mut session = GestureSession::new(tuning)?;
//!
//!     for hands in frames {
//!         let snapshot = FrameSnapshot::classify(hands, &tuning.classifier);
//!         for event in session.step(&snapshot) {
//!             println!("{:?}", event);
//!         }
//!     }
//!
//!     for event in session.shutdown() {
//!         println!("{:?}", event);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod gesture;
mod landmark;
mod session;

pub use {
    error::GestureError,
    error::Result as CoreResult,
    gesture::{
        ClassifierTuning, ExtensionThresholds, Finger, FingerStates, GestureLabel, classify,
        is_extended,
    },
    landmark::{
        FrameSnapshot, HandRecord, Handedness, LANDMARK_COUNT, LabeledHand, LandmarkPoint,
        landmarks,
    },
    session::{
        ActionEvent, Actions, GestureSession, GestureTuning, Key, Mode, MouseButton,
        ScrollDirection,
    },
};

#[cfg(test)]
mod tests;
