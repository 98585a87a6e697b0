//! OS input injection.
//!
//! [`InputInjector`] is the seam between the gesture session and the OS.
//! [`EnigoInjector`] performs the events through enigo.

use crate::{AppError, AppResult};

use handwave_core::{ActionEvent, Key, MouseButton, ScrollDirection};

use std::panic::Location;

use enigo::{Axis, Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};
use error_location::ErrorLocation;
use tracing::{info, instrument, trace};

/// Performs synthetic input events.
///
/// Fire-and-forget: an error reports that the OS rejected the event, it is
/// never retried here.
pub trait InputInjector {
    /// Perform one event.
    fn inject(&mut self, event: ActionEvent) -> AppResult<()>;
}

/// Injector backed by the platform input API via enigo.
pub struct EnigoInjector {
    enigo: Enigo,
}

impl EnigoInjector {
    /// Connect to the platform input API.
    ///
    /// On macOS this fails without accessibility permission.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| AppError::InjectorFailure {
            reason: format!("Failed to create Enigo: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("EnigoInjector initialized");

        Ok(Self { enigo })
    }
}

/// Enigo key for a session key.
pub(crate) fn enigo_key(key: Key) -> enigo::Key {
    match key {
        Key::Alt => enigo::Key::Alt,
        Key::Tab => enigo::Key::Tab,
        Key::Space => enigo::Key::Space,
        Key::LeftArrow => enigo::Key::LeftArrow,
        Key::RightArrow => enigo::Key::RightArrow,
    }
}

/// Enigo button for a session mouse button.
pub(crate) fn enigo_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
    }
}

/// Signed enigo scroll length; enigo scrolls down for positive values.
pub(crate) fn scroll_length(direction: ScrollDirection, magnitude: u32) -> i32 {
    let notches = i32::try_from(magnitude).unwrap_or(i32::MAX);
    match direction {
        ScrollDirection::Up => -notches,
        ScrollDirection::Down => notches,
    }
}

impl InputInjector for EnigoInjector {
    #[track_caller]
    fn inject(&mut self, event: ActionEvent) -> AppResult<()> {
        trace!(event = ?event, "Injecting");

        let result = match event {
            ActionEvent::KeyDown(key) => self.enigo.key(enigo_key(key), Direction::Press),
            ActionEvent::KeyUp(key) => self.enigo.key(enigo_key(key), Direction::Release),
            ActionEvent::MouseMove { dx, dy } => self.enigo.move_mouse(dx, dy, Coordinate::Rel),
            ActionEvent::MouseClick(button) => {
                self.enigo.button(enigo_button(button), Direction::Click)
            }
            ActionEvent::ScrollTick {
                direction,
                magnitude,
            } => self
                .enigo
                .scroll(scroll_length(direction, magnitude), Axis::Vertical),
        };

        result.map_err(|e| AppError::InjectorFailure {
            reason: format!("{:?}: {}", event, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
