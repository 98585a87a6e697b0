/// Commands sent from the hotkey and tray menu handlers to the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Suspend or resume gesture control. Pausing releases held keys.
    TogglePause,
    /// Request application shutdown.
    Shutdown,
}
