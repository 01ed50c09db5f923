//! Scope sources and resolution.
//!
//! A binding accepts heterogeneous scope sources and converts each into the
//! canonical [`ScopeSignal`](crate::ScopeSignal) exactly once, before the
//! producer is subscribed.
//!
//! ## Contents
//! - [`ScopeSource`] closed tagged variant over the three source kinds
//! - [`ProvideScope`] fallible scope-provider capability
//! - [`LifecycleSource`] lifecycle-aware provider capability
//! - [`ScopedLifecycle`] object-safe resolution seam for lifecycle sources
//!
//! ## Quick wiring
//! ```text
//! ScopeSource::Ready(signal)      ──────────────────────────► ScopeSignal
//! ScopeSource::Provider(p)        ── p.request_scope() ─────► ScopeSignal | ScopeError
//! ScopeSource::Lifecycle(l)       ── snapshot + mapping ────► ScopeSignal | ScopeError
//!                                          │
//!                                          └─► watcher task: completes the signal
//!                                              on the target end position
//! ```

mod lifecycle;
mod resolve;
mod source;

pub use lifecycle::{LifecycleSource, ScopedLifecycle};
pub use source::{ProvideScope, ScopeSource};

pub(crate) use resolve::{resolve, Resolution};
