use crate::{AppCommand, AppError, AppResult, event_bridge::EventBridge};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};
use tray_icon::menu::{MenuEvent, MenuId};

/// Turns tray menu clicks into [`AppCommand`]s.
pub struct MenuHandler {
    pause_item_id: MenuId,
    quit_item_id: MenuId,
    command_tx: mpsc::Sender<AppCommand>,
}

impl MenuHandler {
    pub fn new(
        pause_item_id: MenuId,
        quit_item_id: MenuId,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> Self {
        Self {
            pause_item_id,
            quit_item_id,
            command_tx,
        }
    }

    pub(crate) fn command_for(&self, id: &MenuId) -> Option<AppCommand> {
        if *id == self.pause_item_id {
            Some(AppCommand::TogglePause)
        } else if *id == self.quit_item_id {
            Some(AppCommand::Shutdown)
        } else {
            None
        }
    }

    /// Forward menu selections until `shutdown_rx` fires.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut bridge = EventBridge::spawn("tray-menu", || MenuEvent::receiver().recv().ok());

        let result = loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("Menu handler stopping");
                    break Ok(());
                }
                Some(event) = bridge.recv() => {
                    let Some(command) = self.command_for(&event.id) else {
                        continue;
                    };

                    info!(command = ?command, "Tray menu selected");
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
