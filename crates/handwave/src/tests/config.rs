use crate::{AppError, config::Config};

use std::fs;

use uuid::Uuid;

/// WHAT: An empty file yields the full default configuration
/// WHY: Every table and key is optional
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_file_when_parsing_then_defaults() {
    let config = Config::parse("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.controls.quit_hotkey, "CTRL+SHIFT+KeyQ");
    assert_eq!(config.detector.max_hands, 2);
    assert!(config.detector.command.is_none());
    assert!(config.validate().is_ok());
}

/// WHAT: Nested gesture tables override only what they name
/// WHY: `[gestures]` deserializes straight into the core tuning type
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_tables_when_parsing_then_named_values_overridden() {
    // Given
    let text = r#"
        [gestures]
        debounce_frames = 4

        [gestures.classifier.extension_thresholds]
        thumb = 1.2

        [detector]
        command = ["python3", "hand_detect.py"]
        min_hand_score = 0.7
    "#;

    // When
    let config = Config::parse(text).unwrap();

    // Then
    assert_eq!(config.gestures.debounce_frames, 4);
    assert_eq!(config.gestures.classifier.extension_thresholds.thumb, 1.2);
    assert_eq!(config.gestures.classifier.extension_thresholds.index, 0.9);
    assert_eq!(
        config.detector.command,
        Some(vec!["python3".to_string(), "hand_detect.py".to_string()])
    );
    assert_eq!(config.detector.min_hand_score, 0.7);
    assert!(config.validate().is_ok());
}

/// WHAT: Out-of-range gesture tuning fails validation
/// WHY: Invalid tuning must stop startup, never be checked per frame
#[test]
#[allow(clippy::unwrap_used)]
fn given_zero_debounce_when_validating_then_core_error() {
    let config = Config::parse("[gestures]\ndebounce_frames = 0\n").unwrap();

    assert!(matches!(config.validate(), Err(AppError::Core { .. })));
}

/// WHAT: Detector and hotkey sections are validated too
/// WHY: A typo in the hotkey would otherwise only surface after the tray appears
#[test]
#[allow(clippy::unwrap_used)]
fn given_bad_detector_or_hotkey_when_validating_then_config_error() {
    let bad_score = Config::parse("[detector]\nmin_hand_score = 1.5\n").unwrap();
    let no_hands = Config::parse("[detector]\nmax_hands = 0\n").unwrap();
    let empty_command = Config::parse("[detector]\ncommand = []\n").unwrap();
    let bad_hotkey = Config::parse("[controls]\nquit_hotkey = \"CTRL+NOPE\"\n").unwrap();

    for config in [bad_score, no_hands, empty_command, bad_hotkey] {
        assert!(matches!(
            config.validate(),
            Err(AppError::ConfigError { .. })
        ));
    }
}

/// WHAT: Malformed TOML is a ConfigError
/// WHY: Parse failures must be reported, not replaced with defaults
#[test]
fn given_malformed_toml_when_parsing_then_config_error() {
    let result = Config::parse("[gestures\n");

    assert!(matches!(result, Err(AppError::ConfigError { .. })));
}

/// WHAT: Loading a missing path writes defaults there
/// WHY: First run creates an editable config file
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_file_when_loading_then_default_written_and_reloadable() {
    // Given: A path in a fresh directory
    let dir = std::env::temp_dir().join(format!("handwave-test-{}", Uuid::new_v4()));
    let path = dir.join("config.toml");

    // When
    let created = Config::load(Some(path.as_path())).unwrap();

    // Then: File exists, no temp file left, reload gives the same config
    assert!(path.exists());
    assert!(!path.with_extension("toml.tmp").exists());
    assert_eq!(Config::load(Some(path.as_path())).unwrap(), created);

    fs::remove_dir_all(&dir).unwrap();
}
