use crate::{
    AppError, AppResult,
    config::{default_max_hands, default_min_hand_score},
};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Landmark detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Program and arguments that print detector JSON lines to stdout.
    ///
    /// When absent, JSON lines are read from this process's stdin.
    #[serde(default)]
    pub command: Option<Vec<String>>,

    /// Hands scored below this are ignored.
    #[serde(default = "default_min_hand_score")]
    pub min_hand_score: f32,

    /// Hands kept per frame, in detector order.
    #[serde(default = "default_max_hands")]
    pub max_hands: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            command: None,
            min_hand_score: default_min_hand_score(),
            max_hands: default_max_hands(),
        }
    }
}

impl DetectorConfig {
    #[track_caller]
    pub(crate) fn validate(&self) -> AppResult<()> {
        if !(0.0..=1.0).contains(&self.min_hand_score) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "detector.min_hand_score must be in [0, 1], got {}",
                    self.min_hand_score
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.max_hands == 0 {
            return Err(AppError::ConfigError {
                reason: "detector.max_hands must be at least 1".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let program_missing = self
            .command
            .as_ref()
            .is_some_and(|command| command.first().is_none_or(|p| p.trim().is_empty()));

        if program_missing {
            return Err(AppError::ConfigError {
                reason: "detector.command must name a program".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}
