//! Shared helpers: a recording injector and detector JSON for known poses.

use crate::{AppError, AppResult, InputInjector, config::DetectorConfig, landmark_source::parse_line};

use handwave_core::{ActionEvent, FrameSnapshot, GestureTuning};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;

/// Records every event it accepts; can be told to reject `KeyUp`s.
#[derive(Clone, Default)]
pub(crate) struct RecordingInjector {
    events: Arc<Mutex<Vec<ActionEvent>>>,
    failing_key_ups: Arc<AtomicUsize>,
}

impl RecordingInjector {
    /// Reject the next `count` key releases.
    pub(crate) fn fail_key_ups(&self, count: usize) {
        self.failing_key_ups.store(count, Ordering::SeqCst);
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn events(&self) -> Vec<ActionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl InputInjector for RecordingInjector {
    #[allow(clippy::unwrap_used)]
    fn inject(&mut self, event: ActionEvent) -> AppResult<()> {
        if matches!(event, ActionEvent::KeyUp(_)) {
            let rejected = self
                .failing_key_ups
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if rejected {
                return Err(AppError::InjectorFailure {
                    reason: format!("{:?} rejected", event),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Pointing hand: index extended, everything else curled.
pub(crate) const POINTING: [(f32, f32); 21] = [
    (0.50, 0.80),
    (0.44, 0.76),
    (0.40, 0.70),
    (0.37, 0.65),
    (0.47, 0.62),
    (0.45, 0.60),
    (0.45, 0.50),
    (0.45, 0.45),
    (0.45, 0.40),
    (0.50, 0.60),
    (0.50, 0.49),
    (0.50, 0.53),
    (0.50, 0.57),
    (0.55, 0.61),
    (0.55, 0.51),
    (0.55, 0.55),
    (0.54, 0.58),
    (0.60, 0.63),
    (0.61, 0.55),
    (0.60, 0.58),
    (0.58, 0.60),
];

/// Open palm: all five fingers extended.
pub(crate) const OPEN_PALM: [(f32, f32); 21] = [
    (0.50, 0.80),
    (0.44, 0.76),
    (0.40, 0.70),
    (0.37, 0.65),
    (0.30, 0.66),
    (0.45, 0.60),
    (0.45, 0.50),
    (0.45, 0.45),
    (0.45, 0.40),
    (0.50, 0.60),
    (0.50, 0.49),
    (0.50, 0.44),
    (0.50, 0.38),
    (0.55, 0.61),
    (0.55, 0.51),
    (0.55, 0.46),
    (0.55, 0.41),
    (0.60, 0.63),
    (0.61, 0.55),
    (0.615, 0.51),
    (0.62, 0.47),
];

/// JSON for one hand, translated by `dy`.
pub(crate) fn hand_json(points: &[(f32, f32)], dy: f32, score: f32) -> String {
    let landmarks: Vec<String> = points
        .iter()
        .map(|(x, y)| format!(r#"{{"x":{},"y":{},"z":0.0}}"#, x, y + dy))
        .collect();

    format!(
        r#"{{"handedness":"Right","score":{},"landmarks":[{}]}}"#,
        score,
        landmarks.join(",")
    )
}

/// One detector line holding the given hands.
pub(crate) fn line(hands: &[String]) -> String {
    format!(r#"{{"hands":[{}]}}"#, hands.join(","))
}

/// Detector lines that raise an open palm far enough to open the task switcher.
pub(crate) fn raise_palm_lines() -> Vec<String> {
    [0.0, -0.02, -0.05]
        .iter()
        .map(|dy| line(&[hand_json(&OPEN_PALM, *dy, 0.9)]))
        .collect()
}

/// Parse a detector line and classify it with default thresholds.
pub(crate) fn snapshot(text: &str) -> FrameSnapshot {
    let hands = parse_line(text, &DetectorConfig::default()).unwrap_or_default();
    FrameSnapshot::classify(hands, &GestureTuning::default().classifier)
}
