//! # scopebind
//!
//! **Scopebind** binds the lifetime of an active subscription to an external
//! scope: when the scope ends, the subscription is torn down exactly once,
//! from exactly one of two possible trigger sources, with no further events
//! delivered.
//!
//! The crate is a library-level concurrency primitive, not a reactive
//! framework: it wraps one existing producer/consumer pair per binding and
//! adds no operators.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ScopeSignal │ ProvideScope │ LifecycleSource      (heterogeneous sources)
//!        └──────┴──────┬───────┴──────┘
//!                      ▼
//!              ┌──────────────────┐   violations   ┌─────────────────────┐
//!              │  ScopeSource     ├───────────────►│ plugins (routing)   │
//!              │  resolution      │◄───────────────┤ suppress / deliver  │
//!              └────────┬─────────┘                └─────────────────────┘
//!                       ▼ ScopeSignal
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Binding coordinator (one per subscription)                         │
//! │  - producer driver task ── Produce::run(Emitter, ctx)               │
//! │  - scope watcher task ──── ScopeSignal::outcome()                   │
//! │  - disposal gate ───────── ACTIVE ─CAS─► DISPOSING ──► DISPOSED     │
//! └──────┬──────────────────────────────────────────────────────┬───────┘
//!        ▼                                                      ▼
//!   Consume<T> (values + at most one terminal)             BoundHandle
//!                                                      (external cancel)
//! ```
//!
//! ### Lifecycle
//! ```text
//! bind_to_scope(producer, scope) ──► Bound ──► subscribe(consumer)
//!
//! subscribe:
//!   ├─► resolve scope (once, before the producer runs)
//!   │     ├─ violation delivered → consumer.on_error, producer never starts
//!   │     └─ violation suppressed → silent no-op
//!   └─► race producer vs. scope signal:
//!         ├─ producer completes/errs → terminal forwarded, scope unsubscribed
//!         ├─ scope ends             → silent severance, producer cancelled
//!         ├─ scope errs             → error forwarded, producer cancelled
//!         └─ handle.cancel()        → synthetic scope end
//! ```
//!
//! ## Features
//! | Area            | Description                                                  | Key types / traits                       |
//! |-----------------|--------------------------------------------------------------|------------------------------------------|
//! | **Binding**     | Decorate a producer with a scope; race-free teardown.        | [`bind_to_scope`], [`Bound`], [`BoundHandle`] |
//! | **Scopes**      | Canonical signal plus provider and lifecycle sources.        | [`ScopeSignal`], [`ScopeSource`], [`LifecycleSource`] |
//! | **Flow**        | Producer/consumer seams and function-backed impls.           | [`Produce`], [`Consume`], [`ProduceFn`], [`ConsumeFn`] |
//! | **Shapes**      | Single-value and value-less adapters over one coordinator.   | [`shapes`]                               |
//! | **Routing**     | Process-wide or per-binding violation policy.                | [`RouteViolations`], [`set_router`]      |
//! | **Errors**      | Typed boundary violations and terminal errors.               | [`ScopeError`], [`FlowError`]            |
//! | **Events**      | Optional lifecycle observability per binding.                | [`Event`], [`EventKind`], [`Bus`]        |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use scopebind::{bind_to_scope, ConsumeFn, Emitter, FlowError, ProduceFn, ProducerRef, ScopeSignal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let scope = ScopeSignal::new();
//!
//!     let producer: ProducerRef<u32> = ProduceFn::arc("ticker", |out: Emitter<u32>, ctx: CancellationToken| async move {
//!         let mut n = 0;
//!         while !ctx.is_cancelled() && out.emit(n) {
//!             n += 1;
//!             tokio::task::yield_now().await;
//!         }
//!         Ok(())
//!     });
//!
//!     let consumer = ConsumeFn::new(|n: u32| println!("tick {n}"))
//!         .when_error(|err: FlowError| eprintln!("terminal: {err}"))
//!         .arc();
//!
//!     let handle = bind_to_scope(producer, scope.clone()).subscribe(consumer);
//!
//!     // Ending the scope severs the binding silently - no further ticks.
//!     scope.complete();
//!     handle.cancel(); // idempotent: the scope end already disposed it
//! }
//! ```

mod bind;
mod error;
mod events;
mod flow;
mod plugins;
mod scope;
mod signal;

// ---- Public re-exports ----

pub use bind::{bind_to_scope, Bound, BoundHandle, Emitter, SubscriptionHandle};
pub use error::{FlowError, ScopeError};
pub use events::{Bus, Event, EventKind};
pub use flow::shapes;
pub use flow::{Consume, ConsumeFn, Produce, ProduceFn, ProducerRef};
pub use plugins::{
    reset_router, set_router, set_trace_capture, trace_capture, RouteViolations, Routing,
    Violation,
};
pub use scope::{LifecycleSource, ProvideScope, ScopeSource, ScopedLifecycle};
pub use signal::{ScopeOutcome, ScopeSignal, SignalState};

// Optional: expose a simple built-in event logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogWriter;
