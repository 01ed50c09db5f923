//! # Producer abstraction.
//!
//! This module defines the [`Produce`] trait (async, cancelable) for the
//! upstream side of a binding. The common handle type is [`ProducerRef`], an
//! `Arc<dyn Produce>` suitable for sharing with the coordinator.
//!
//! A producer receives an [`Emitter`] to push values downstream and a
//! [`CancellationToken`] that is cancelled when the binding is disposed
//! (scope ended, consumer cancelled, or the producer's own terminal won).
//! Implementors should regularly check cancellation and exit promptly.

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::bind::Emitter;
use crate::error::FlowError;

/// # Asynchronous, cancelable event producer.
///
/// A `Produce` has a stable [`name`](Produce::name) and an async
/// [`run`](Produce::run) method that drives one subscription: emit zero or
/// more values through the [`Emitter`], then return `Ok(())` to complete or
/// `Err` to terminate with an error. Returning after `ctx` is cancelled
/// produces no terminal at all - the binding was already severed.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use scopebind::{Emitter, FlowError, Produce};
///
/// struct Counter;
///
/// #[async_trait]
/// impl Produce for Counter {
///     type Item = u32;
///
///     fn name(&self) -> &str { "counter" }
///
///     async fn run(&self, out: Emitter<u32>, ctx: CancellationToken) -> Result<(), FlowError> {
///         for n in 0..3 {
///             if ctx.is_cancelled() || !out.emit(n) {
///                 return Ok(());
///             }
///         }
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Produce: Send + Sync + 'static {
    /// Value type pushed downstream. Use `()` for value-less producers.
    type Item: Send + 'static;

    /// Returns a stable, human-readable producer name.
    fn name(&self) -> &str;

    /// Drives one subscription until completion, error, or cancellation.
    ///
    /// Implementations should stop emitting once `ctx.is_cancelled()` or once
    /// [`Emitter::emit`] reports the binding closed.
    async fn run(&self, out: Emitter<Self::Item>, ctx: CancellationToken)
        -> Result<(), FlowError>;
}

/// Shared reference to a producer.
pub type ProducerRef<T> = Arc<dyn Produce<Item = T>>;
