use handwave_core::GestureError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the handwave binary.
///
/// Every variant records where it was raised.
#[derive(Error, Debug)]
pub enum AppError {
    /// Gesture pipeline error from handwave-core.
    #[error("Gesture error: {source} {location}")]
    Core {
        /// The underlying gesture error.
        #[source]
        source: GestureError,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// The OS rejected a synthetic input event.
    #[error("Input injection failed: {reason} {location}")]
    InjectorFailure {
        /// What went wrong.
        reason: String,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// Configuration loading, saving or validation error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// What went wrong.
        reason: String,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// Landmark detector could not be started or read.
    #[error("Detector error: {reason} {location}")]
    DetectorError {
        /// What went wrong.
        reason: String,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// Failed to register global hotkey.
    #[error("Hotkey registration failed: {reason} {location}")]
    HotkeyRegistrationFailed {
        /// What went wrong.
        reason: String,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// Tray icon or menu could not be created or updated.
    #[error("Tray error: {reason} {location}")]
    TrayError {
        /// What went wrong.
        reason: String,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// What could not be delivered.
        message: String,
        /// Call site that raised the error.
        location: ErrorLocation,
    },

    /// IO error from filesystem or pipe operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Call site that raised the error.
        location: ErrorLocation,
    },
}

// Hand-written From impls capture the caller location,
// which #[from] cannot fill.
impl From<GestureError> for AppError {
    #[track_caller]
    fn from(source: GestureError) -> Self {
        AppError::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result alias for the binary.
pub type Result<T> = StdResult<T, AppError>;
