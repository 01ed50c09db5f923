//! # Shape adapters: single-value and value-less bindings.
//!
//! The coordinator is implemented exactly once, generically over the item
//! type. Producers and consumers with other shapes plug into it through thin
//! adapters instead of duplicating the state machine:
//!
//! - [`ProduceOnce`] / [`OnceProducer`] - a producer that resolves exactly one
//!   value and completes.
//! - [`ConsumeOnce`] / [`OnceConsumer`] - a consumer that observes exactly one
//!   success value or one error.
//! - [`ConsumeDone`] / [`DoneConsumer`] - a value-less consumer that only
//!   observes completion or error (pair it with a `Produce<Item = ()>` that
//!   never emits).
//!
//! ## Example
//! ```no_run
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use scopebind::{bind_to_scope, FlowError, ScopeSignal};
//! use scopebind::shapes::{ConsumeOnce, OnceConsumer, OnceProducer, ProduceOnce};
//!
//! struct Fetch;
//!
//! #[async_trait]
//! impl ProduceOnce for Fetch {
//!     type Output = String;
//!     fn name(&self) -> &str { "fetch" }
//!     async fn resolve(&self, _ctx: CancellationToken) -> Result<String, FlowError> {
//!         Ok("payload".to_string())
//!     }
//! }
//!
//! struct Sink;
//!
//! impl ConsumeOnce<String> for Sink {
//!     fn on_success(&self, value: String) { println!("{value}"); }
//!     fn on_error(&self, err: FlowError) { eprintln!("{err}"); }
//! }
//!
//! let scope = ScopeSignal::new();
//! let handle = bind_to_scope(OnceProducer::arc(Fetch), scope)
//!     .subscribe(OnceConsumer::arc(Sink));
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bind::Emitter;
use crate::error::FlowError;
use crate::flow::consume::Consume;
use crate::flow::produce::Produce;

/// Producer shape that resolves exactly one value.
#[async_trait]
pub trait ProduceOnce: Send + Sync + 'static {
    /// The single value type.
    type Output: Send + 'static;

    /// Returns a stable, human-readable producer name.
    fn name(&self) -> &str;

    /// Resolves the single value, or fails.
    async fn resolve(&self, ctx: CancellationToken) -> Result<Self::Output, FlowError>;
}

/// Bridges a [`ProduceOnce`] into the generic [`Produce`] shape:
/// emit the resolved value, then complete.
pub struct OnceProducer<P> {
    inner: P,
}

impl<P: ProduceOnce> OnceProducer<P> {
    /// Wraps a single-value producer as a [`ProducerRef`](crate::ProducerRef).
    pub fn arc(inner: P) -> Arc<Self> {
        Arc::new(Self { inner })
    }
}

#[async_trait]
impl<P: ProduceOnce> Produce for OnceProducer<P> {
    type Item = P::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn run(
        &self,
        out: Emitter<Self::Item>,
        ctx: CancellationToken,
    ) -> Result<(), FlowError> {
        let value = self.inner.resolve(ctx).await?;
        out.emit(value);
        Ok(())
    }
}

/// Consumer shape for single-value bindings.
pub trait ConsumeOnce<T>: Send + Sync + 'static {
    /// Receives the single resolved value.
    fn on_success(&self, value: T);

    /// Receives the single terminal error of the binding.
    fn on_error(&self, err: FlowError) {
        let _ = err;
    }
}

/// Bridges a [`ConsumeOnce`] into the generic [`Consume`] shape.
///
/// The success value arrives through `on_item`; the completion that follows
/// it carries no extra information for this shape and is dropped.
pub struct OnceConsumer<C> {
    inner: C,
}

impl<C> OnceConsumer<C> {
    /// Wraps a single-value consumer as a shared [`Consume`] handle.
    pub fn arc(inner: C) -> Arc<Self> {
        Arc::new(Self { inner })
    }
}

impl<T: Send + 'static, C: ConsumeOnce<T>> Consume<T> for OnceConsumer<C> {
    fn on_item(&self, item: T) {
        self.inner.on_success(item);
    }

    fn on_error(&self, err: FlowError) {
        self.inner.on_error(err);
    }
}

/// Consumer shape for value-less bindings: completion or error only.
pub trait ConsumeDone: Send + Sync + 'static {
    /// Receives the producer's completion.
    fn on_complete(&self);

    /// Receives the single terminal error of the binding.
    fn on_error(&self, err: FlowError) {
        let _ = err;
    }
}

/// Bridges a [`ConsumeDone`] into the generic [`Consume`] shape over `()`.
pub struct DoneConsumer<C> {
    inner: C,
}

impl<C> DoneConsumer<C> {
    /// Wraps a value-less consumer as a shared [`Consume`] handle.
    pub fn arc(inner: C) -> Arc<Self> {
        Arc::new(Self { inner })
    }
}

impl<C: ConsumeDone> Consume<()> for DoneConsumer<C> {
    fn on_item(&self, _item: ()) {}

    fn on_complete(&self) {
        self.inner.on_complete();
    }

    fn on_error(&self, err: FlowError) {
        self.inner.on_error(err);
    }
}
