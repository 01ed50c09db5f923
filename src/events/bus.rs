//! # Event bus for broadcasting binding lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking event publishing from multiple bindings to any number of
//! observers.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or suspends; it can be
//!   called from the coordinator's disposal path.
//! - **Bounded capacity**: a single ring buffer stores recent events for all
//!   receivers; slow receivers observe `RecvError::Lagged(n)` and skip the
//!   `n` oldest items.
//! - **No persistence**: events published with no active receiver are dropped.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for binding lifecycle events.
///
/// Cheap to clone (internally holds an `Arc`-backed sender); attach the same
/// bus to many bindings to observe them together.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped; the call still
    /// returns immediately.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    ///
    /// Each call creates an independent receiver; it only sees events sent
    /// after it subscribed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
