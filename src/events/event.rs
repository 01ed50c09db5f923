//! # Lifecycle events emitted by bound subscriptions.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Resolution events**: how scope resolution ended (subscribed, refused, suppressed)
//! - **Scope events**: the scope signal terminating (ended, errored)
//! - **Terminal events**: producer completion/failure and external cancellation
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order across bindings.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of binding lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Resolution events ===
    /// Scope resolution succeeded; both sides are subscribed.
    ///
    /// Sets: `binding`, `at`, `seq`.
    Subscribed,

    /// A boundary violation was delivered to the consumer; the producer was
    /// never subscribed.
    ///
    /// Sets: `binding`, `reason` (violation label), `at`, `seq`.
    ViolationDelivered,

    /// A boundary violation was suppressed by the routing policy; the binding
    /// is a silent no-op.
    ///
    /// Sets: `binding`, `reason` (violation label), `at`, `seq`.
    ViolationSuppressed,

    // === Scope events ===
    /// The scope ended; the binding severed silently.
    ///
    /// Sets: `binding`, `at`, `seq`.
    ScopeEnded,

    /// The scope errored; the error became the consumer's terminal.
    ///
    /// Sets: `binding`, `reason`, `at`, `seq`.
    ScopeErrored,

    // === Terminal events ===
    /// The producer completed normally.
    ///
    /// Sets: `binding`, `at`, `seq`.
    ProducerCompleted,

    /// The producer failed (or panicked); the error became the terminal.
    ///
    /// Sets: `binding`, `reason`, `at`, `seq`.
    ProducerErrored,

    /// The consumer cancelled the binding externally.
    ///
    /// Sets: `binding`, `at`, `seq`.
    Cancelled,
}

/// Binding lifecycle event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the binding (the producer's name), if applicable.
    pub binding: Option<Arc<str>>,
    /// Human-readable reason (violation labels, error messages).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            binding: None,
            reason: None,
        }
    }

    /// Attaches the binding name.
    #[inline]
    pub fn with_binding(mut self, binding: impl Into<Arc<str>>) -> Self {
        self.binding = Some(binding.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// True for the terminal kinds that end an established binding.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::ScopeEnded
                | EventKind::ScopeErrored
                | EventKind::ProducerCompleted
                | EventKind::ProducerErrored
                | EventKind::Cancelled
        )
    }
}
