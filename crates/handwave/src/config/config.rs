//! Configuration management for handwave.
//!
//! `config.toml` lives in the platform config directory unless `--config`
//! names another file. It is created with defaults on first run and
//! validated once before anything else starts.

use crate::{
    AppError, AppResult,
    config::{ControlsConfig, DetectorConfig},
};

use handwave_core::GestureTuning;

use std::{
    fs,
    io::{self, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Classifier thresholds and state machine timing.
    #[serde(default)]
    pub gestures: GestureTuning,
    /// Landmark detector process and hand filtering.
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Application hotkeys.
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl Config {
    /// Load configuration from `path`, or from the platform config directory
    /// when `path` is `None`. A missing file is created with defaults.
    ///
    /// The result is validated before it is returned, so an out-of-range
    /// value stops startup instead of misbehaving per frame.
    #[track_caller]
    #[instrument]
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Could not read {}: {}", config_path.display(), e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::parse(&contents)?;
            info!(config_path = ?config_path, "Configuration loaded");
            config
        } else {
            info!(config_path = ?config_path, "No config found, creating default");
            Self::create_default(&config_path)?
        };

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text. Missing tables and keys take their defaults.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Config is not valid TOML: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Check every section once at startup.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        self.gestures.validate()?;
        self.detector.validate()?;
        self.controls.quit_hotkey()?;
        Ok(())
    }

    /// Write the configuration to `config_path`, creating its directory.
    ///
    /// The text goes to a sibling temp file that is synced and renamed over
    /// the target, so readers never see a half-written file.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Config not serializable: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let missing_dir = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty() && !dir.exists());

        if let Some(parent) = missing_dir {
            fs::create_dir_all(parent)?;
            debug!(config_dir = ?parent, "Created config directory");
        }

        write_atomically(config_path, &contents).map_err(|e| AppError::ConfigError {
            reason: format!("Could not write {}: {}", config_path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration written");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "handwave", "Handwave").ok_or_else(|| {
            AppError::ConfigError {
                reason: "No home directory to place config.toml in".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    #[track_caller]
    fn create_default(config_path: &Path) -> AppResult<Self> {
        let config = Config::default();
        config.save(config_path)?;
        Ok(config)
    }
}

fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let temp_path = path.with_extension("toml.tmp");

    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });

    match written.and_then(|()| fs::rename(&temp_path, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}
