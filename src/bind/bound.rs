//! # Binding entry point and wiring.
//!
//! [`bind_to_scope`] decorates a producer with a scope. Subscribing the
//! returned [`Bound`] resolves the scope (routing violations through the
//! policy), then races the producer against the scope signal until exactly
//! one of them terminates the binding.
//!
//! ## Architecture
//! ```text
//! bind_to_scope(producer, scope) ──► Bound ──► subscribe(consumer)
//!
//! subscribe():
//!   ├─► resolve(scope)
//!   │     ├─ Refused(err)   → consumer.on_error(OutOfScope)   (producer never runs)
//!   │     ├─ Suppressed     → silent no-op                    (producer never runs)
//!   │     └─ Granted(signal)
//!   │           ├─ signal already terminal → sever/deliver    (producer never runs)
//!   │           └─ pending:
//!   │                ├─► spawn producer driver ── run(emitter, ctx) ──► Gate
//!   │                └─► spawn scope watcher ──── outcome() ─────────► Gate
//!   └─► BoundHandle (external, idempotent cancel)
//! ```
//!
//! ## Rules
//! - Resolution happens before the producer is subscribed; a synchronous
//!   resolution failure means the producer never starts.
//! - The consumer receives at most one terminal signal, from exactly one of
//!   the two trigger sources.
//! - A producer panic is contained and reported as a producer error.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::bind::emitter::Emitter;
use crate::bind::gate::{Gate, GateCore};
use crate::bind::handle::SubscriptionHandle;
use crate::error::FlowError;
use crate::events::{Bus, EventKind};
use crate::flow::{Consume, ProducerRef};
use crate::plugins::RouteViolations;
use crate::scope::{resolve, Resolution, ScopeSource};
use crate::signal::{ScopeOutcome, ScopeSignal, SignalState};

/// Binds a producer to a scope.
///
/// The returned [`Bound`] is producer-shaped: nothing runs until
/// [`Bound::subscribe`] is called. Invoke this as the **last** step before
/// the final subscription - stages applied on top of a bound producer are
/// outside the binding and will not be torn down with it.
pub fn bind_to_scope<T: Send + 'static>(
    producer: ProducerRef<T>,
    scope: impl Into<ScopeSource>,
) -> Bound<T> {
    Bound {
        producer,
        scope: scope.into(),
        router: None,
        capture_trace: None,
        bus: None,
    }
}

/// A producer decorated with a scope, waiting to be subscribed.
///
/// Per-binding overrides fall back to the process-wide defaults when unset
/// (see [`set_router`](crate::set_router) and
/// [`set_trace_capture`](crate::set_trace_capture)).
pub struct Bound<T> {
    producer: ProducerRef<T>,
    scope: ScopeSource,
    router: Option<Arc<dyn RouteViolations>>,
    capture_trace: Option<bool>,
    bus: Option<Bus>,
}

impl<T: Send + 'static> Bound<T> {
    /// Overrides the violation routing policy for this binding only.
    pub fn with_router(mut self, router: Arc<dyn RouteViolations>) -> Self {
        self.router = Some(router);
        self
    }

    /// Overrides call-site trace capture for this binding only.
    pub fn with_trace_capture(mut self, enabled: bool) -> Self {
        self.capture_trace = Some(enabled);
        self
    }

    /// Attaches an event bus observing this binding's lifecycle.
    pub fn with_events(mut self, bus: Bus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Resolves the scope and, on success, subscribes both sides.
    ///
    /// Must be called within a tokio runtime: the producer driver and the
    /// scope watcher run as spawned tasks.
    pub fn subscribe(self, consumer: Arc<dyn Consume<T>>) -> BoundHandle {
        let binding: Arc<str> = Arc::from(self.producer.name());

        let signal = match resolve(&self.scope, self.router.as_ref(), self.capture_trace) {
            Resolution::Refused(err) => {
                let core = Arc::new(GateCore::sealed(self.bus, binding));
                core.publish(EventKind::ViolationDelivered, Some(Arc::from(err.as_label())));
                consumer.on_error(FlowError::OutOfScope(err));
                return BoundHandle { core };
            }
            Resolution::Suppressed(violation) => {
                let core = Arc::new(GateCore::sealed(self.bus, binding));
                core.publish(
                    EventKind::ViolationSuppressed,
                    Some(Arc::from(violation.as_label())),
                );
                return BoundHandle { core };
            }
            Resolution::Granted(signal) => signal,
        };

        // A scope that is already over severs the binding before the producer
        // is ever subscribed.
        match signal.state() {
            SignalState::Ended => {
                let core = Arc::new(GateCore::sealed(self.bus, binding));
                core.publish(EventKind::ScopeEnded, None);
                return BoundHandle { core };
            }
            SignalState::Errored => {
                let core = Arc::new(GateCore::sealed(self.bus, binding));
                let reason = signal.reason().unwrap_or_else(|| Arc::from("scope error"));
                core.publish(EventKind::ScopeErrored, Some(reason.clone()));
                consumer.on_error(FlowError::Scope { reason });
                return BoundHandle { core };
            }
            SignalState::Pending => {}
        }

        let core = Arc::new(GateCore::new(
            SubscriptionHandle::new(),
            SubscriptionHandle::new(),
            self.bus,
            binding,
        ));
        let gate = Arc::new(Gate::new(Arc::clone(&core), consumer));
        core.publish(EventKind::Subscribed, None);

        spawn_scope_watcher(Arc::clone(&gate), signal);
        spawn_producer_driver(gate, self.producer);

        BoundHandle { core }
    }
}

/// Waits for the scope signal to terminate, unless the binding is disposed
/// first (the scope handle doubles as this watcher's cancellation).
fn spawn_scope_watcher<T: Send + 'static>(gate: Arc<Gate<T>>, signal: ScopeSignal) {
    let unsubscribed = gate.core().scope_handle().token();
    tokio::spawn(async move {
        tokio::select! {
            _ = unsubscribed.cancelled() => {}
            outcome = signal.outcome() => match outcome {
                ScopeOutcome::Ended => gate.scope_ended(),
                ScopeOutcome::Errored(reason) => gate.scope_errored(reason),
            }
        }
    });
}

/// Runs the producer to its terminal, containing panics.
fn spawn_producer_driver<T: Send + 'static>(gate: Arc<Gate<T>>, producer: ProducerRef<T>) {
    let ctx = gate.core().producer_handle().token();
    let emitter = Emitter::new(Arc::clone(&gate));
    tokio::spawn(async move {
        let run = producer.run(emitter, ctx);
        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(Ok(())) => gate.producer_complete(),
            Ok(Err(err)) => gate.producer_error(err),
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "opaque panic payload".to_string());
                gate.producer_error(FlowError::producer(format!("producer panicked: {detail}")));
            }
        }
    });
}

/// Consumer-side handle to a bound subscription.
///
/// Cancelling is equivalent to a synthetic scope-end: immediate, silent, and
/// idempotent.
#[derive(Clone)]
pub struct BoundHandle {
    core: Arc<GateCore>,
}

impl BoundHandle {
    /// Severs the binding: both subscriptions are cancelled, nothing further
    /// reaches the consumer. Safe to call any number of times.
    pub fn cancel(&self) {
        self.core.cancel();
    }

    /// True once the binding reached its terminal DISPOSED phase.
    pub fn is_disposed(&self) -> bool {
        self.core.is_disposed()
    }
}

impl std::fmt::Debug for BoundHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundHandle")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
