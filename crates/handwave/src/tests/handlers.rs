use crate::{AppCommand, HotkeyHandler, MenuHandler, event_bridge::EventBridge};

use std::sync::mpsc as std_mpsc;

use global_hotkey::HotKeyState;
use tokio::sync::mpsc;
use tray_icon::menu::MenuId;

/// WHAT: Only a press of the quit hotkey requests shutdown
/// WHY: The release of the same chord must not send a second command
#[test]
fn given_quit_hotkey_events_when_mapping_then_press_only_quits() {
    let (command_tx, _command_rx) = mpsc::channel(1);
    let handler = HotkeyHandler::new(7, command_tx);

    assert_eq!(
        handler.command_for(7, HotKeyState::Pressed),
        Some(AppCommand::Shutdown)
    );
    assert_eq!(handler.command_for(7, HotKeyState::Released), None);
    assert_eq!(handler.command_for(8, HotKeyState::Pressed), None);
}

/// WHAT: Tray menu items map to their commands
/// WHY: Pause and Quit are the only ways to control the app from the tray
#[test]
fn given_menu_ids_when_mapping_then_pause_and_quit_recognised() {
    let (command_tx, _command_rx) = mpsc::channel(1);
    let handler = MenuHandler::new(MenuId::new("pause"), MenuId::new("quit"), command_tx);

    assert_eq!(
        handler.command_for(&MenuId::new("pause")),
        Some(AppCommand::TogglePause)
    );
    assert_eq!(
        handler.command_for(&MenuId::new("quit")),
        Some(AppCommand::Shutdown)
    );
    assert_eq!(handler.command_for(&MenuId::new("other")), None);
}

/// WHAT: Closed command channel is detected before state changes
/// WHY: A quit request must never be silently dropped
#[tokio::test]
async fn given_closed_channel_when_sending_shutdown_then_error() {
    // Given: Frame loop already gone
    let (command_tx, command_rx) = mpsc::channel(1);
    drop(command_rx);

    // When
    let result = command_tx.send(AppCommand::Shutdown).await;

    // Then
    assert!(result.is_err());
}

/// WHAT: Events from a blocking receiver arrive in order and the bridge stops
/// WHY: Hotkey and menu events both come from blocking crossbeam receivers
#[tokio::test]
async fn given_blocking_source_when_bridged_then_events_forwarded_in_order() {
    // Given: A blocking source with two queued events, then closed
    let (source_tx, source_rx) = std_mpsc::channel();
    let _ = source_tx.send(1u32);
    let _ = source_tx.send(2u32);
    drop(source_tx);

    // When
    let mut bridge = EventBridge::spawn("test", move || source_rx.recv().ok());

    // Then: Both events arrive, then the closed source ends the stream
    assert_eq!(bridge.recv().await, Some(1));
    assert_eq!(bridge.recv().await, Some(2));
    assert_eq!(bridge.recv().await, None);
    bridge.stop().await;
}
