use crate::TrayIconState;

use tao::event_loop::EventLoopProxy;

/// Messages from the frame loop to the event loop thread, which owns the
/// `!Send` tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayCommand {
    /// Show the given mode.
    SetState(TrayIconState),
    /// Frame loop has finished; exit the event loop.
    Shutdown,
}

/// Delivers [`TrayCommand`]s to whoever owns the tray.
pub trait TraySender: Send {
    /// Send a command. Returns `false` when the receiving side is gone.
    fn send_command(&self, command: TrayCommand) -> bool;
}

impl TraySender for EventLoopProxy<TrayCommand> {
    fn send_command(&self, command: TrayCommand) -> bool {
        self.send_event(command).is_ok()
    }
}

impl TraySender for std::sync::mpsc::Sender<TrayCommand> {
    fn send_command(&self, command: TrayCommand) -> bool {
        self.send(command).is_ok()
    }
}
