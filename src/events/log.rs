//! # Simple logging listener for debugging and demos.
//!
//! [`LogWriter`] prints binding lifecycle events to stdout in a human-readable
//! format. This is primarily useful for development, debugging, and examples.
//!
//! ## Output format
//! ```text
//! [subscribed] binding=ticker
//! [scope-ended] binding=ticker
//! [producer-errored] binding=fetch reason="connection refused"
//! [violation-suppressed] binding=fetch reason=scope_not_started
//! ```

use tokio::task::JoinHandle;

use super::bus::Bus;
use super::event::{Event, EventKind};

/// Simple stdout logging listener.
///
/// Enabled via the `logging` feature. Not intended for production use -
/// subscribe to the [`Bus`] directly for structured logging or metrics.
pub struct LogWriter;

impl LogWriter {
    /// Subscribes to the bus and prints every event until the bus is dropped.
    pub fn spawn(bus: &Bus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => Self::write(&ev),
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        eprintln!("[scopebind] log writer lagged, skipped {n} events");
                    }
                }
            }
        })
    }

    fn write(ev: &Event) {
        let binding = ev.binding.as_deref().unwrap_or("?");
        match ev.kind {
            EventKind::Subscribed => println!("[subscribed] binding={binding}"),
            EventKind::ScopeEnded => println!("[scope-ended] binding={binding}"),
            EventKind::ScopeErrored => {
                println!("[scope-errored] binding={binding} reason={:?}", ev.reason)
            }
            EventKind::ProducerCompleted => println!("[producer-completed] binding={binding}"),
            EventKind::ProducerErrored => {
                println!("[producer-errored] binding={binding} reason={:?}", ev.reason)
            }
            EventKind::Cancelled => println!("[cancelled] binding={binding}"),
            EventKind::ViolationDelivered => {
                println!("[violation-delivered] binding={binding} reason={:?}", ev.reason)
            }
            EventKind::ViolationSuppressed => {
                println!("[violation-suppressed] binding={binding} reason={:?}", ev.reason)
            }
        }
    }
}
