//! System tray mode indicator.
//!
//! Shows the active gesture mode as a coloured dot with a tooltip, and offers
//! Pause and Quit in its context menu.

use crate::{AppError, AppResult, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{Menu, MenuId, MenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

/// Edge length of the generated icon in pixels.
const ICON_SIZE: u32 = 32;

/// Owns the tray icon and its menu. Must stay on the event loop thread.
pub struct TrayManager {
    tray_icon: TrayIcon,
    pause_item: MenuItem,
    quit_item_id: MenuId,
    state: TrayIconState,
}

impl TrayManager {
    /// Create the tray icon in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let pause_item = MenuItem::new("Pause", true, None);
        let quit_item = MenuItem::new("Quit", true, None);

        let menu = Menu::new();
        menu.append_items(&[&pause_item, &quit_item])
            .map_err(|e| AppError::TrayError {
                reason: format!("Tray menu rejected its items: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let state = TrayIconState::Idle;
        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(state.tooltip())
            .with_menu(Box::new(menu))
            .with_icon(indicator_icon(state)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Tray icon not created: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(state = ?state, "Mode indicator shown");

        Ok(Self {
            tray_icon,
            pause_item,
            quit_item_id: quit_item.id().clone(),
            state,
        })
    }

    /// Show a new state. Repeating the current state is a no-op.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        if state == self.state {
            return Ok(());
        }

        self.tray_icon
            .set_icon(Some(indicator_icon(state)?))
            .and_then(|()| self.tray_icon.set_tooltip(Some(state.tooltip())))
            .map_err(|e| AppError::TrayError {
                reason: format!("Tray icon not switched to {:?}: {}", state, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.pause_item.set_text(match state {
            TrayIconState::Paused => "Resume",
            _ => "Pause",
        });

        debug!(from = ?self.state, to = ?state, "Tray state updated");
        self.state = state;

        Ok(())
    }

    /// Menu id of the Pause/Resume item.
    pub fn pause_item_id(&self) -> &MenuId {
        self.pause_item.id()
    }

    /// Menu id of the Quit item.
    pub fn quit_item_id(&self) -> &MenuId {
        &self.quit_item_id
    }
}

/// RGBA pixels of a filled circle in the state's colour on a transparent
/// square.
pub(crate) fn indicator_pixels(state: TrayIconState) -> Vec<u8> {
    let colour = state.colour();
    let centre = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 1.0;

    (0..ICON_SIZE * ICON_SIZE)
        .flat_map(|i| {
            let dx = (i % ICON_SIZE) as f32 - centre;
            let dy = (i / ICON_SIZE) as f32 - centre;
            if dx * dx + dy * dy <= radius * radius {
                colour
            } else {
                [0, 0, 0, 0]
            }
        })
        .collect()
}

#[track_caller]
fn indicator_icon(state: TrayIconState) -> AppResult<Icon> {
    Icon::from_rgba(indicator_pixels(state), ICON_SIZE, ICON_SIZE).map_err(|e| {
        AppError::TrayError {
            reason: format!("Indicator pixels rejected: {}", e),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}
