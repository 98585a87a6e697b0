use error_location::ErrorLocation;
use thiserror::Error;

/// Gesture pipeline errors with source location tracking.
#[derive(Error, Debug)]
pub enum GestureError {
    /// Hand record did not carry the expected number of landmarks.
    #[error("Malformed hand: expected {expected} landmarks, got {actual} {location}")]
    MalformedHand {
        /// Landmark count every record must have.
        expected: usize,
        /// Landmark count actually received.
        actual: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A landmark coordinate was NaN or infinite.
    #[error("Invalid landmark at index {index} {location}")]
    InvalidLandmark {
        /// Index of the offending landmark.
        index: usize,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A tuning value is out of its accepted range.
    #[error("Invalid tuning: {reason} {location}")]
    InvalidTuning {
        /// Which value failed and why.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`GestureError`].
pub type Result<T> = std::result::Result<T, GestureError>;
