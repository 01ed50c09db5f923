//! # Consumer trait.
//!
//! Provides [`Consume`], the downstream end the coordinator forwards into.
//!
//! ## Rules
//! - Methods are synchronous and must not block or suspend: they are invoked
//!   inline on the producer's forwarding path and on disposal paths.
//! - The coordinator guarantees at most one terminal call
//!   (`on_complete` *or* `on_error`), and no `on_item` after it.
//! - A silent scope-end invokes **neither** terminal method: the consumer
//!   simply stops hearing from the binding.
//! - Handlers must not panic; handle failures internally.

use crate::error::FlowError;

/// Downstream consumer of a bound subscription.
///
/// Implementations receive values in emission order while the binding is
/// active, then at most one terminal call. Re-entering the binding (for
/// example cancelling the [`BoundHandle`](crate::BoundHandle) from inside a
/// handler) is safe: no lock is held across any of these calls.
///
/// # Example
/// ```
/// use scopebind::{Consume, FlowError};
///
/// struct Printer;
///
/// impl Consume<u32> for Printer {
///     fn on_item(&self, item: u32) {
///         println!("item={item}");
///     }
///
///     fn on_error(&self, err: FlowError) {
///         eprintln!("terminal err={err}");
///     }
/// }
/// ```
pub trait Consume<T>: Send + Sync + 'static {
    /// Receives one value emitted by the producer while the binding is active.
    fn on_item(&self, item: T);

    /// Receives the producer's normal completion.
    ///
    /// Never called after a scope-end severance or an error terminal.
    fn on_complete(&self) {}

    /// Receives the single terminal error of the binding.
    fn on_error(&self, err: FlowError) {
        let _ = err;
    }
}
