//! Binding lifecycle events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! observe what happens to bound subscriptions: resolution verdicts, scope
//! terminations, producer terminals, and external cancellations.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! Events are published only for bindings that carry a bus
//! (see [`Bound::with_events`](crate::Bound::with_events)); per-item
//! forwarding is never instrumented.

mod bus;
mod event;

#[cfg(feature = "logging")]
mod log;

pub use bus::Bus;
pub use event::{Event, EventKind};

#[cfg(feature = "logging")]
pub use log::LogWriter;
