use crate::{AppResult, InputInjector};

use handwave_core::{ActionEvent, FrameSnapshot, GestureSession, Key};

use tracing::{debug, warn};

/// RAII owner of the gesture session and the injector that performs its
/// events. Guarantees held keys are released when dropped.
///
/// Prevents a stuck Alt if the frame loop returns early or panics while the
/// task switcher is open. A `KeyUp` the OS rejects is queued and retried
/// before the next batch of events, so the OS never keeps a key the session
/// has already let go of.
pub struct HeldKeyGuard<I: InputInjector> {
    session: GestureSession,
    injector: I,
    pending_releases: Vec<Key>,
}

impl<I: InputInjector> HeldKeyGuard<I> {
    pub(crate) fn new(session: GestureSession, injector: I) -> Self {
        Self {
            session,
            injector,
            pending_releases: Vec::new(),
        }
    }

    /// Gesture session driven by this guard.
    pub(crate) fn session(&self) -> &GestureSession {
        &self.session
    }

    /// Injector events are sent to.
    #[cfg(test)]
    pub(crate) fn injector(&self) -> &I {
        &self.injector
    }

    /// Releases the OS rejected and that are waiting for a retry.
    pub(crate) fn pending_releases(&self) -> &[Key] {
        &self.pending_releases
    }

    /// Advance the session one frame and inject what it produces.
    ///
    /// Every event is attempted even if an earlier one fails; the first
    /// failure is returned.
    pub(crate) fn step(&mut self, frame: &FrameSnapshot) -> AppResult<()> {
        let events: Vec<ActionEvent> = self.session.step(frame).collect();
        self.apply(events)
    }

    /// Release every held key and return the session to idle.
    pub(crate) fn release_all(&mut self) -> AppResult<()> {
        let events: Vec<ActionEvent> = self.session.shutdown().collect();
        self.apply(events)
    }

    fn apply(&mut self, events: Vec<ActionEvent>) -> AppResult<()> {
        let mut first_error = None;

        for key in std::mem::take(&mut self.pending_releases) {
            match self.injector.inject(ActionEvent::KeyUp(key)) {
                Ok(()) => debug!(key = ?key, "Retried key release succeeded"),
                Err(e) => {
                    warn!(key = ?key, error = %e, "Key release failed again");
                    self.pending_releases.push(key);
                    first_error.get_or_insert(e);
                }
            }
        }

        for event in events {
            if let Err(e) = self.injector.inject(event) {
                warn!(event = ?event, error = %e, "Input event failed");
                if let ActionEvent::KeyUp(key) = event {
                    self.pending_releases.push(key);
                }
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<I: InputInjector> Drop for HeldKeyGuard<I> {
    fn drop(&mut self) {
        if let Err(e) = self.release_all() {
            warn!(error = %e, "Failed to release held keys on drop");
        }
    }
}
