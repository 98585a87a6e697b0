use crate::{
    HeldKeyGuard,
    tests::support::{RecordingInjector, raise_palm_lines, snapshot},
};

use handwave_core::{ActionEvent, FrameSnapshot, GestureSession, GestureTuning, Key};

#[allow(clippy::unwrap_used)]
fn guard(injector: &RecordingInjector) -> HeldKeyGuard<RecordingInjector> {
    HeldKeyGuard::new(
        GestureSession::new(GestureTuning::default()).unwrap(),
        injector.clone(),
    )
}

#[allow(clippy::unwrap_used)]
fn open_task_switcher(guard: &mut HeldKeyGuard<RecordingInjector>) {
    for text in raise_palm_lines() {
        guard.step(&snapshot(&text)).unwrap();
    }
    assert!(guard.session().alt_held());
}

/// WHAT: Dropping the guard releases Alt
/// WHY: An early return from the frame loop must not leave Alt stuck
#[test]
fn given_alt_held_when_guard_dropped_then_alt_released() {
    // Given: Task switcher open
    let injector = RecordingInjector::default();
    let mut guard = guard(&injector);
    open_task_switcher(&mut guard);

    // When
    drop(guard);

    // Then
    assert_eq!(
        injector.events(),
        vec![
            ActionEvent::KeyDown(Key::Alt),
            ActionEvent::KeyDown(Key::Tab),
            ActionEvent::KeyUp(Key::Tab),
            ActionEvent::KeyUp(Key::Alt),
        ]
    );
}

/// WHAT: A rejected release is retried before the next frame's events
/// WHY: The OS must not keep a key the session already let go of
#[test]
fn given_release_rejected_when_next_frame_stepped_then_release_retried() {
    // Given: Alt held and the OS rejecting one release
    let injector = RecordingInjector::default();
    let mut guard = guard(&injector);
    open_task_switcher(&mut guard);
    injector.fail_key_ups(1);

    // When: Releasing fails, then another frame arrives
    let released = guard.release_all();
    assert!(released.is_err());
    assert_eq!(guard.pending_releases(), &[Key::Alt]);
    assert!(!guard.session().alt_held());

    let stepped = guard.step(&FrameSnapshot::empty());

    // Then: Retry succeeded and nothing is pending
    assert!(stepped.is_ok());
    assert!(guard.pending_releases().is_empty());
    assert_eq!(injector.events().last(), Some(&ActionEvent::KeyUp(Key::Alt)));
}

/// WHAT: A failed event does not stop the rest of the batch
/// WHY: Fire-and-forget injection attempts every event
#[test]
fn given_tab_release_rejected_when_entering_task_switcher_then_rest_still_injected() {
    let injector = RecordingInjector::default();
    let mut guard = guard(&injector);
    let lines = raise_palm_lines();
    let _ = guard.step(&snapshot(&lines[0]));
    let _ = guard.step(&snapshot(&lines[1]));

    injector.fail_key_ups(1);
    let result = guard.step(&snapshot(&lines[2]));

    assert!(result.is_err());
    assert_eq!(
        injector.events(),
        vec![ActionEvent::KeyDown(Key::Alt), ActionEvent::KeyDown(Key::Tab)]
    );
    assert_eq!(guard.pending_releases(), &[Key::Tab]);
    // Logical state is not rolled back
    assert!(guard.session().is_alt_tab_active());
    assert_eq!(guard.injector().events().len(), 2);
}
