//! Global quit hotkey.
//!
//! Registers the configured hotkey and turns presses into
//! [`AppCommand::Shutdown`] for the frame loop.

use crate::{AppCommand, AppError, AppResult, event_bridge::EventBridge};

use std::panic::Location;

use error_location::ErrorLocation;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState, hotkey::HotKey};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

/// Forwards quit hotkey presses to the frame loop.
pub struct HotkeyHandler {
    quit_hotkey_id: u32,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Register `hotkey` system-wide and return the manager with the hotkey id.
    ///
    /// Call this on the thread that runs the `tao` event loop; on Windows the
    /// hotkey messages are only pumped there. Dropping the manager
    /// unregisters the hotkey.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey(hotkey: HotKey) -> AppResult<(GlobalHotKeyManager, u32)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("No hotkey manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("{:?} is unavailable: {}", hotkey, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = ?hotkey, "Quit hotkey registered");

        Ok((manager, hotkey.id()))
    }

    /// Handler for the hotkey registered under `quit_hotkey_id`.
    pub fn new(quit_hotkey_id: u32, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            quit_hotkey_id,
            command_tx,
        }
    }

    /// Only a press of the quit hotkey maps to a command.
    pub(crate) fn command_for(&self, id: u32, state: HotKeyState) -> Option<AppCommand> {
        (id == self.quit_hotkey_id && state == HotKeyState::Pressed).then_some(AppCommand::Shutdown)
    }

    /// Forward hotkey presses until `shutdown_rx` fires.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let mut bridge = EventBridge::spawn("hotkey", move || receiver.recv().ok());

        let result = loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("Hotkey handler stopping");
                    break Ok(());
                }
                Some(event) = bridge.recv() => {
                    let Some(command) = self.command_for(event.id, event.state) else {
                        continue;
                    };

                    info!("Quit hotkey pressed");
                    if let Err(e) = self.command_tx.send(command).await {
                        break Err(AppError::ChannelSendFailed {
                            message: format!("Frame loop gone, {:?} dropped: {}", command, e),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                }
            }
        };

        bridge.stop().await;
        result
    }
}
