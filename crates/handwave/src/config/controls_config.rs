use crate::{AppError, AppResult, config::default_quit_hotkey};

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;
use global_hotkey::hotkey::HotKey;
use serde::{Deserialize, Serialize};

/// Keyboard controls for the application itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// Global hotkey that quits, in `global-hotkey` syntax (e.g. `CTRL+SHIFT+KeyQ`).
    #[serde(default = "default_quit_hotkey")]
    pub quit_hotkey: String,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            quit_hotkey: default_quit_hotkey(),
        }
    }
}

impl ControlsConfig {
    /// Parse the configured quit hotkey.
    #[track_caller]
    pub(crate) fn quit_hotkey(&self) -> AppResult<HotKey> {
        HotKey::from_str(&self.quit_hotkey).map_err(|e| AppError::ConfigError {
            reason: format!("Invalid quit_hotkey {:?}: {}", self.quit_hotkey, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
