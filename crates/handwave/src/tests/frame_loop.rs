use crate::{
    AppCommand, FrameLoop, HeldKeyGuard, LandmarkSource, TrayCommand, TrayIconState,
    config::DetectorConfig,
    tests::support::{POINTING, RecordingInjector, hand_json, line, raise_palm_lines},
};

use handwave_core::{ActionEvent, GestureSession, GestureTuning, Key};

use std::io::Cursor;

use tokio::sync::{mpsc, watch};
use uuid::Uuid;

struct Harness {
    injector: RecordingInjector,
    tray_rx: std::sync::mpsc::Receiver<TrayCommand>,
    command_tx: mpsc::Sender<AppCommand>,
    shutdown_rx: watch::Receiver<bool>,
    frame_loop: FrameLoop<RecordingInjector, std::sync::mpsc::Sender<TrayCommand>>,
}

#[allow(clippy::unwrap_used)]
fn harness(lines: &[String]) -> Harness {
    let injector = RecordingInjector::default();
    let (tray_tx, tray_rx) = std::sync::mpsc::channel();
    let (command_tx, command_rx) = mpsc::channel(8);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut text = lines.join("\n");
    text.push('\n');
    let tuning = GestureTuning::default();

    let frame_loop = FrameLoop {
        guard: HeldKeyGuard::new(GestureSession::new(tuning).unwrap(), injector.clone()),
        source: LandmarkSource::from_reader(
            Cursor::new(text.into_bytes()),
            DetectorConfig::default(),
        ),
        classifier: tuning.classifier,
        tray_tx,
        command_rx,
        shutdown_tx,
        run_id: Uuid::new_v4(),
    };

    Harness {
        injector,
        tray_rx,
        command_tx,
        shutdown_rx,
        frame_loop,
    }
}

/// WHAT: Stream ending with Alt held still releases Alt
/// WHY: End of input is a quit path and must not leave keys stuck
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_alt_held_when_stream_ends_then_alt_released_and_shutdown_signalled() {
    // Given: Palm raise opens the task switcher, then the detector exits
    let h = harness(&raise_palm_lines());

    // When
    h.frame_loop.run().await.unwrap();

    // Then: Alt pressed and released exactly once
    assert_eq!(
        h.injector.events(),
        vec![
            ActionEvent::KeyDown(Key::Alt),
            ActionEvent::KeyDown(Key::Tab),
            ActionEvent::KeyUp(Key::Tab),
            ActionEvent::KeyUp(Key::Alt),
        ]
    );

    let tray: Vec<TrayCommand> = h.tray_rx.try_iter().collect();
    assert_eq!(
        tray,
        vec![
            TrayCommand::SetState(TrayIconState::AltTab),
            TrayCommand::Shutdown,
        ]
    );
    assert!(*h.shutdown_rx.borrow());
}

/// WHAT: A queued shutdown wins over pending frames
/// WHY: Quit must take effect between frames, not after the backlog
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_shutdown_queued_when_running_then_no_frames_processed() {
    let h = harness(&raise_palm_lines());
    h.command_tx.send(AppCommand::Shutdown).await.unwrap();

    h.frame_loop.run().await.unwrap();

    assert!(h.injector.events().is_empty());
    assert_eq!(h.tray_rx.try_iter().last(), Some(TrayCommand::Shutdown));
}

/// WHAT: Paused control ignores gestures
/// WHY: The user can rest their hands without triggering input
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_paused_when_gestures_arrive_then_nothing_injected() {
    // Given: Pause requested before any frame
    let h = harness(&raise_palm_lines());
    h.command_tx.send(AppCommand::TogglePause).await.unwrap();

    // When
    h.frame_loop.run().await.unwrap();

    // Then
    assert!(h.injector.events().is_empty());
    let tray: Vec<TrayCommand> = h.tray_rx.try_iter().collect();
    assert_eq!(tray[0], TrayCommand::SetState(TrayIconState::Paused));
}

/// WHAT: Pointing drives the cursor through the whole pipeline
/// WHY: JSON lines to MouseMove is the main path of the program
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_moving_pointing_hand_when_running_then_cursor_moves() {
    // Given: Five pointing frames drifting down
    let lines: Vec<String> = (0..5)
        .map(|i| line(&[hand_json(&POINTING, 0.01 * i as f32, 0.9)]))
        .collect();
    let h = harness(&lines);

    // When
    h.frame_loop.run().await.unwrap();

    // Then: Cursor moved down only, mouse control shown in the tray
    let events = h.injector.events();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| matches!(
        e,
        ActionEvent::MouseMove { dx: 0, dy } if *dy > 0
    )));

    let tray: Vec<TrayCommand> = h.tray_rx.try_iter().collect();
    assert_eq!(
        tray.first(),
        Some(&TrayCommand::SetState(TrayIconState::MouseControl))
    );
}

/// WHAT: Shutdown completes when the tray and the other tasks are already gone
/// WHY: Failed exit notifications are logged, and held keys are still released
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_tray_and_handlers_gone_when_stream_ends_then_keys_released_and_ok() {
    // Given: Alt will be held, and nobody listens for tray or shutdown messages
    let Harness {
        injector,
        tray_rx,
        shutdown_rx,
        frame_loop,
        ..
    } = harness(&raise_palm_lines());
    drop(tray_rx);
    drop(shutdown_rx);

    // When
    let result = frame_loop.run().await;

    // Then
    assert!(result.is_ok());
    assert_eq!(
        injector.events().last(),
        Some(&ActionEvent::KeyUp(Key::Alt))
    );
}
