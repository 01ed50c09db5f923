//! # Disposal gate: the tri-state coordinator state machine.
//!
//! One [`GateCore`] exists per active binding. It reconciles the two
//! independent terminal sources (producer task, scope watcher) plus external
//! cancellation into a single consistent outcome.
//!
//! ## State machine
//! ```text
//! ACTIVE ──CAS──► DISPOSING ──► DISPOSED
//!
//! ACTIVE:    both handles live, values forwarded downstream
//! DISPOSING: transitional; the CAS winner cancels both handles and delivers
//!            at most one terminal
//! DISPOSED:  terminal; no further effect is possible
//! ```
//!
//! ## Rules
//! - The ACTIVE→DISPOSING transition is won by exactly one caller via an
//!   atomic compare-and-set; the loser's event is dropped.
//! - Only the winner cancels the two handles, so each handle is cancelled by
//!   at most one thread (the handles tolerate redundant cancellation anyway).
//! - Terminal delivery happens after both handles are cancelled and before
//!   the phase is sealed DISPOSED.
//! - No lock is held across any call into the consumer; a consumer handler
//!   may re-enter the binding (e.g. cancel it) without deadlock.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::bind::handle::SubscriptionHandle;
use crate::error::FlowError;
use crate::events::{Bus, Event, EventKind};
use crate::flow::Consume;

const ACTIVE: u8 = 0;
const DISPOSING: u8 = 1;
const DISPOSED: u8 = 2;

/// Shared, type-erased part of the gate: phase flag, both handles, and the
/// observability channel. [`BoundHandle`](crate::BoundHandle) holds this to
/// cancel without knowing the item type.
pub(crate) struct GateCore {
    phase: AtomicU8,
    producer: SubscriptionHandle,
    scope: SubscriptionHandle,
    bus: Option<Bus>,
    binding: Arc<str>,
}

impl GateCore {
    pub(crate) fn new(
        producer: SubscriptionHandle,
        scope: SubscriptionHandle,
        bus: Option<Bus>,
        binding: Arc<str>,
    ) -> Self {
        Self {
            phase: AtomicU8::new(ACTIVE),
            producer,
            scope,
            bus,
            binding,
        }
    }

    /// A gate that never went ACTIVE: used for refused/suppressed bindings.
    pub(crate) fn sealed(bus: Option<Bus>, binding: Arc<str>) -> Self {
        let core = Self::new(
            SubscriptionHandle::new(),
            SubscriptionHandle::new(),
            bus,
            binding,
        );
        core.producer.cancel();
        core.scope.cancel();
        core.phase.store(DISPOSED, Ordering::Release);
        core
    }

    /// Attempts the single ACTIVE→DISPOSING transition.
    ///
    /// Exactly one caller over the gate's lifetime observes `true`.
    fn win(&self) -> bool {
        self.phase
            .compare_exchange(ACTIVE, DISPOSING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn seal(&self) {
        self.phase.store(DISPOSED, Ordering::Release);
    }

    fn release_handles(&self) {
        self.producer.cancel();
        self.scope.cancel();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.phase.load(Ordering::Acquire) == ACTIVE
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.phase.load(Ordering::Acquire) == DISPOSED
    }

    pub(crate) fn producer_handle(&self) -> &SubscriptionHandle {
        &self.producer
    }

    pub(crate) fn scope_handle(&self) -> &SubscriptionHandle {
        &self.scope
    }

    pub(crate) fn publish(&self, kind: EventKind, reason: Option<Arc<str>>) {
        if let Some(bus) = &self.bus {
            let mut ev = Event::new(kind).with_binding(self.binding.clone());
            if let Some(reason) = reason {
                ev = ev.with_reason(reason);
            }
            bus.publish(ev);
        }
    }

    /// External cancellation: a synthetic scope-end with no delivery.
    ///
    /// Idempotent; a no-op once another trigger won the transition.
    pub(crate) fn cancel(&self) {
        if self.win() {
            self.release_handles();
            self.publish(EventKind::Cancelled, None);
            self.seal();
        }
    }
}

/// Typed gate: the core plus the downstream consumer.
///
/// Every producer-side and scope-side effect flows through here.
pub(crate) struct Gate<T> {
    core: Arc<GateCore>,
    consumer: Arc<dyn Consume<T>>,
}

impl<T: Send + 'static> Gate<T> {
    pub(crate) fn new(core: Arc<GateCore>, consumer: Arc<dyn Consume<T>>) -> Self {
        Self { core, consumer }
    }

    pub(crate) fn core(&self) -> &Arc<GateCore> {
        &self.core
    }

    /// Forwards one value downstream if the binding is still ACTIVE.
    ///
    /// The phase is re-checked immediately before invoking the consumer, so
    /// no forward that starts after DISPOSING was published can deliver.
    pub(crate) fn forward(&self, item: T) -> bool {
        if self.core.is_active() {
            self.consumer.on_item(item);
            true
        } else {
            false
        }
    }

    /// Producer completed normally: forward the terminal, dispose the rest.
    pub(crate) fn producer_complete(&self) {
        if self.core.win() {
            self.core.release_handles();
            self.consumer.on_complete();
            self.core.publish(EventKind::ProducerCompleted, None);
            self.core.seal();
        }
    }

    /// Producer failed: forward the error unchanged, dispose the rest.
    pub(crate) fn producer_error(&self, err: FlowError) {
        if self.core.win() {
            self.core.release_handles();
            let reason = Arc::from(err.as_message());
            self.consumer.on_error(err);
            self.core.publish(EventKind::ProducerErrored, Some(reason));
            self.core.seal();
        }
    }

    /// Scope ended: silent severance, nothing reaches the consumer.
    pub(crate) fn scope_ended(&self) {
        if self.core.win() {
            self.core.release_handles();
            self.core.publish(EventKind::ScopeEnded, None);
            self.core.seal();
        }
    }

    /// Scope errored: the reason becomes the consumer's terminal error.
    pub(crate) fn scope_errored(&self, reason: Arc<str>) {
        if self.core.win() {
            self.core.release_handles();
            self.consumer.on_error(FlowError::Scope {
                reason: reason.clone(),
            });
            self.core.publish(EventKind::ScopeErrored, Some(reason));
            self.core.seal();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Probe {
        items: Mutex<Vec<u32>>,
        completes: AtomicUsize,
        errors: Mutex<Vec<FlowError>>,
    }

    impl Consume<u32> for Probe {
        fn on_item(&self, item: u32) {
            self.items.lock().unwrap().push(item);
        }

        fn on_complete(&self) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_error(&self, err: FlowError) {
            self.errors.lock().unwrap().push(err);
        }
    }

    fn gate(probe: &Arc<Probe>) -> Gate<u32> {
        let core = Arc::new(GateCore::new(
            SubscriptionHandle::new(),
            SubscriptionHandle::new(),
            None,
            Arc::from("test"),
        ));
        Gate::new(core, probe.clone())
    }

    #[test]
    fn test_forward_only_while_active() {
        let probe = Arc::new(Probe::default());
        let g = gate(&probe);

        assert!(g.forward(1));
        g.scope_ended();
        assert!(!g.forward(2));

        assert_eq!(*probe.items.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_scope_end_is_silent_and_cancels_both() {
        let probe = Arc::new(Probe::default());
        let g = gate(&probe);
        g.scope_ended();

        assert!(g.core().is_disposed());
        assert!(g.core().producer_handle().is_cancelled());
        assert!(g.core().scope_handle().is_cancelled());
        assert_eq!(probe.completes.load(Ordering::SeqCst), 0);
        assert!(probe.errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_producer_complete_delivers_one_terminal() {
        let probe = Arc::new(Probe::default());
        let g = gate(&probe);
        g.producer_complete();
        g.producer_complete();
        g.scope_ended();

        assert_eq!(probe.completes.load(Ordering::SeqCst), 1);
        assert!(g.core().is_disposed());
    }

    #[test]
    fn test_scope_error_reaches_consumer_once() {
        let probe = Arc::new(Probe::default());
        let g = gate(&probe);
        g.scope_errored(Arc::from("detached"));
        g.scope_errored(Arc::from("again"));

        let errors = probe.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], FlowError::Scope { reason } if reason.as_ref() == "detached"));
    }

    #[test]
    fn test_external_cancel_is_idempotent_and_silent() {
        let probe = Arc::new(Probe::default());
        let g = gate(&probe);
        g.core().cancel();
        g.core().cancel();

        assert!(g.core().is_disposed());
        assert_eq!(probe.completes.load(Ordering::SeqCst), 0);
        assert!(probe.errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_losers_event_is_dropped() {
        let probe = Arc::new(Probe::default());
        let g = gate(&probe);
        g.scope_ended();
        g.producer_error(FlowError::producer("late"));

        assert!(probe.errors.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_triggers_have_one_winner() {
        for _ in 0..128 {
            let probe = Arc::new(Probe::default());
            let g = Arc::new(gate(&probe));

            let a = g.clone();
            let b = g.clone();
            let ja = tokio::spawn(async move { a.producer_complete() });
            let jb = tokio::spawn(async move { b.scope_ended() });
            ja.await.unwrap();
            jb.await.unwrap();

            // At most one terminal: either the completion won or the silent
            // severance did - never both, never neither side disposed.
            assert!(probe.completes.load(Ordering::SeqCst) <= 1);
            assert!(g.core().is_disposed());
            assert!(g.core().producer_handle().is_cancelled());
            assert!(g.core().scope_handle().is_cancelled());
        }
    }
}
