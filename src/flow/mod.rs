//! Producer and consumer abstractions for bound subscriptions.
//!
//! This module provides the two ends a binding wraps:
//! - [`Produce`] - trait for implementing async cancelable event producers
//! - [`ProduceFn`] - function-backed producer implementation
//! - [`ProducerRef`] - shared reference to a producer (`Arc<dyn Produce>`)
//! - [`Consume`] - trait the coordinator forwards into (never suspends)
//! - [`ConsumeFn`] - closure-backed consumer implementation
//! - [`shapes`] - single-value and value-less adapters over the same coordinator

mod consume;
mod consume_fn;
mod produce;
mod produce_fn;
pub mod shapes;

pub use consume::Consume;
pub use consume_fn::ConsumeFn;
pub use produce::{Produce, ProducerRef};
pub use produce_fn::ProduceFn;
