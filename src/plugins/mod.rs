//! Pluggable handling of scope-boundary violations.
//!
//! This module groups the knobs that control **what happens** when a scope
//! source cannot produce a valid end-of-scope signal.
//!
//! ## Contents
//! - [`RouteViolations`] the routing policy trait (suppress / deliver / transform)
//! - [`Routing`] the policy's verdict
//! - [`Violation`] the violation plus optional captured call-site trace
//! - process-wide registration: [`set_router`], [`reset_router`],
//!   [`set_trace_capture`], [`trace_capture`]
//!
//! ## Quick wiring
//! ```text
//! ScopeSource resolution ──Err(ScopeError)──► plugins::route()
//!      ├─ Routing::Suppress     → binding is a silent no-op
//!      └─ Routing::Deliver(err) → consumer.on_error(FlowError::OutOfScope(err))
//! ```
//!
//! ## Defaults
//! - No router registered → every violation is delivered unchanged (identity).
//! - Trace capture disabled → violations carry no call-site trace; enabling it
//!   has no effect on routing outcomes.

mod routing;

pub use routing::{
    reset_router, set_router, set_trace_capture, trace_capture, RouteViolations, Routing,
    Violation,
};

pub(crate) use routing::route;
