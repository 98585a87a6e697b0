//! Bridges the blocking event receivers of `global-hotkey` and `tray-icon`
//! into tokio.

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

const BRIDGE_CAPACITY: usize = 32;
const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Async side of a blocking event source.
pub(crate) struct EventBridge<E> {
    name: &'static str,
    events: mpsc::Receiver<E>,
    forwarder: JoinHandle<()>,
}

impl<E: Send + 'static> EventBridge<E> {
    /// Start forwarding. `recv` blocks until the next event and returns
    /// `None` once the source is closed.
    pub(crate) fn spawn<F>(name: &'static str, mut recv: F) -> Self
    where
        F: FnMut() -> Option<E> + Send + 'static,
    {
        let (event_tx, events) = mpsc::channel(BRIDGE_CAPACITY);

        // Exits on the first failed send after `events` is dropped.
        let forwarder = tokio::task::spawn_blocking(move || {
            while let Some(event) = recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        Self {
            name,
            events,
            forwarder,
        }
    }

    /// Next forwarded event.
    pub(crate) async fn recv(&mut self) -> Option<E> {
        self.events.recv().await
    }

    /// Close the channel and wait briefly for the forwarder. It may sit in
    /// a blocking `recv` until the next OS event; the runtime reaps it on exit.
    pub(crate) async fn stop(self) {
        let Self {
            name,
            events,
            forwarder,
        } = self;
        drop(events);

        match tokio::time::timeout(STOP_TIMEOUT, forwarder).await {
            Ok(Ok(())) => debug!(bridge = name, "Event forwarder stopped"),
            Ok(Err(e)) => warn!(bridge = name, error = ?e, "Event forwarder panicked"),
            Err(_) => debug!(bridge = name, "Event forwarder still blocked, leaving it"),
        }
    }
}
