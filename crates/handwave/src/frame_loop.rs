use crate::{
    AppCommand, AppResult, HeldKeyGuard, InputInjector, LandmarkSource, TrayCommand,
    TrayIconState, TraySender,
};

use handwave_core::{ClassifierTuning, FrameSnapshot, HandRecord};

use tokio::sync::{mpsc, watch};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// What woke the loop up.
enum Wake {
    Command(AppCommand),
    Frame(AppResult<Option<Vec<HandRecord>>>),
}

/// Pulls frames, classifies them, steps the session and injects the result.
///
/// Runs on the async runtime thread. Tray updates go back to the main
/// thread through `tray_tx` because `TrayIcon` is `!Send` and must remain on
/// the UI thread.
pub struct FrameLoop<I: InputInjector, T: TraySender> {
    pub(crate) guard: HeldKeyGuard<I>,
    pub(crate) source: LandmarkSource,
    pub(crate) classifier: ClassifierTuning,
    pub(crate) tray_tx: T,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) run_id: Uuid,
}

impl<I: InputInjector, T: TraySender> FrameLoop<I, T> {
    /// Run until quit is requested or the landmark stream ends.
    ///
    /// Every held key is released before this returns, and the tray and the
    /// other tasks are told to shut down.
    #[instrument(skip(self), fields(run_id = %self.run_id))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Handwave starting");

        let mut paused = false;
        let mut shown = TrayIconState::Idle;
        let mut frames: u64 = 0;
        let mut failed_frames: u64 = 0;

        loop {
            let wake = tokio::select! {
                biased;

                Some(command) = self.command_rx.recv() => Wake::Command(command),
                frame = self.source.next_frame() => Wake::Frame(frame),
            };

            match wake {
                Wake::Command(AppCommand::Shutdown) => {
                    info!("Shutdown requested");
                    break;
                }
                Wake::Command(AppCommand::TogglePause) => {
                    paused = !paused;
                    if paused {
                        if let Err(e) = self.guard.release_all() {
                            error!(error = ?e, "Failed to release keys on pause");
                        }
                    }
                    info!(paused, "Gesture control toggled");
                }
                Wake::Frame(Ok(Some(hands))) => {
                    if paused {
                        continue;
                    }

                    frames += 1;
                    let snapshot = FrameSnapshot::classify(hands, &self.classifier);
                    if let Err(e) = self.guard.step(&snapshot) {
                        failed_frames += 1;
                        warn!(error = %e, "Input injection failed");
                    }
                }
                Wake::Frame(Ok(None)) => {
                    info!("Landmark stream ended");
                    break;
                }
                Wake::Frame(Err(e)) => {
                    error!(error = ?e, "Landmark source failed");
                    break;
                }
            }

            let state = if paused {
                TrayIconState::Paused
            } else {
                TrayIconState::from(self.guard.session().mode())
            };

            if state != shown {
                shown = state;
                if !self.tray_tx.send_command(TrayCommand::SetState(state)) {
                    warn!("Tray is gone, mode indicator not updated");
                }
            }
        }

        if let Err(e) = self.guard.release_all() {
            error!(error = ?e, "Failed to release held keys on shutdown");
        }

        let pending = self.guard.pending_releases();
        if !pending.is_empty() {
            warn!(keys = ?pending, "Keys the OS refused to release");
        }

        if !self.tray_tx.send_command(TrayCommand::Shutdown) {
            warn!("Tray is gone, event loop not told to exit");
        }
        if self.shutdown_tx.send(true).is_err() {
            warn!("No handler left to receive the shutdown signal");
        }

        info!(frames, failed_frames, "Handwave shut down");

        Ok(())
    }
}
