//! Landmark detector input.
//!
//! Reads one JSON object per line, either from a spawned detector process
//! (typically a MediaPipe script) or from stdin, and turns each line into the
//! validated hand records of one frame.

use crate::{AppError, AppResult, config::DetectorConfig};

use handwave_core::{HandRecord, Handedness, LandmarkPoint};

use std::{panic::Location, process::Stdio};

use error_location::ErrorLocation;
use serde::Deserialize;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    process::{Child, Command},
};
use tracing::{debug, info, instrument, warn};

/// Line a detector prints once its model is loaded.
const READY_LINE: &str = "READY";

#[derive(Debug, Deserialize)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

#[derive(Debug, Deserialize)]
struct HandJson {
    handedness: String,
    #[serde(default = "full_score")]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Debug, Deserialize)]
struct DetectionJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

fn full_score() -> f32 {
    1.0
}

/// Convert one detector line into the hands of one frame.
///
/// Returns `None` for lines that carry no frame (blank lines and the
/// `READY` handshake). Unparseable lines, detector-reported errors, and
/// malformed hands are logged and yield fewer (possibly zero) hands.
pub(crate) fn parse_line(line: &str, config: &DetectorConfig) -> Option<Vec<HandRecord>> {
    let line = line.trim();
    if line.is_empty() || line == READY_LINE {
        return None;
    }

    let detection: DetectionJson = match serde_json::from_str(line) {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "Unparseable detector line, treating as no hands");
            return Some(Vec::new());
        }
    };

    if let Some(error) = detection.error {
        warn!(error = %error, "Detector reported an error");
        return Some(Vec::new());
    }

    let hands = detection
        .hands
        .into_iter()
        .filter(|hand| hand.score >= config.min_hand_score)
        .filter_map(|hand| {
            let Some(handedness) = Handedness::from_label(&hand.handedness) else {
                warn!(label = %hand.handedness, "Unknown handedness, dropping hand");
                return None;
            };

            let points: Vec<LandmarkPoint> = hand
                .landmarks
                .iter()
                .map(|lm| LandmarkPoint::with_depth(lm.x, lm.y, lm.z))
                .collect();

            match HandRecord::new(&points, handedness) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(error = %e, "Rejected hand record");
                    None
                }
            }
        })
        .take(config.max_hands)
        .collect();

    Some(hands)
}

/// Stream of per-frame hand records.
pub struct LandmarkSource {
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    /// Bytes of the line being read. Survives a cancelled read.
    line: Vec<u8>,
    config: DetectorConfig,
    /// Detector process, killed when the source is dropped.
    child: Option<Child>,
}

impl LandmarkSource {
    /// Open the source described by `config`: spawn `command` when set,
    /// otherwise read stdin.
    #[track_caller]
    #[instrument(skip(config))]
    pub fn open(config: &DetectorConfig) -> AppResult<Self> {
        match &config.command {
            Some(command) => Self::spawn(command, config),
            None => {
                info!("Reading landmarks from stdin");
                Ok(Self::from_reader(
                    BufReader::new(tokio::io::stdin()),
                    config.clone(),
                ))
            }
        }
    }

    /// Read JSON lines from any buffered reader.
    pub fn from_reader<R>(reader: R, config: DetectorConfig) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            line: Vec::new(),
            config,
            child: None,
        }
    }

    #[track_caller]
    fn spawn(command: &[String], config: &DetectorConfig) -> AppResult<Self> {
        let Some((program, args)) = command.split_first() else {
            return Err(AppError::DetectorError {
                reason: "Detector command is empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::DetectorError {
                reason: format!("Failed to start detector {:?}: {}", program, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let stdout = child.stdout.take().ok_or_else(|| AppError::DetectorError {
            reason: "Detector stdout was not captured".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(program = %program, pid = ?child.id(), "Detector started");

        let mut source = Self::from_reader(BufReader::new(stdout), config.clone());
        source.child = Some(child);
        Ok(source)
    }

    /// Wait for the next frame.
    ///
    /// Returns `Ok(None)` when the detector closes its output. Lines that
    /// are not valid UTF-8 are decoded lossily and end up as empty frames.
    /// Cancel safe: a partially read line is kept for the next call.
    pub async fn next_frame(&mut self) -> AppResult<Option<Vec<HandRecord>>> {
        loop {
            let read = self
                .reader
                .read_until(b'\n', &mut self.line)
                .await
                .map_err(|e| AppError::DetectorError {
                    reason: format!("Failed to read detector output: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            if read == 0 && self.line.is_empty() {
                self.log_exit();
                return Ok(None);
            }

            let line = String::from_utf8_lossy(&self.line).into_owned();
            self.line.clear();

            if let Some(hands) = parse_line(&line, &self.config) {
                return Ok(Some(hands));
            }
        }
    }

    fn log_exit(&mut self) {
        let Some(child) = self.child.as_mut() else {
            debug!("Landmark input closed");
            return;
        };

        match child.try_wait() {
            Ok(Some(status)) => info!(status = %status, "Detector exited"),
            Ok(None) => warn!("Detector closed stdout but is still running"),
            Err(e) => warn!(error = %e, "Failed to query detector status"),
        }
    }
}
