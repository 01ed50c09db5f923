//! # Function-backed producer (`ProduceFn`)
//!
//! [`ProduceFn`] wraps a closure `F: Fn(Emitter<T>, CancellationToken) -> Fut`,
//! producing a fresh future per subscription. This avoids shared mutable state;
//! if state must be shared across subscriptions, capture an `Arc<...>`
//! explicitly inside the closure.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use scopebind::{Emitter, FlowError, ProduceFn, ProducerRef};
//!
//! let p: ProducerRef<u32> = ProduceFn::arc("ticks", |out: Emitter<u32>, ctx: CancellationToken| async move {
//!     if !ctx.is_cancelled() {
//!         out.emit(1);
//!     }
//!     Ok::<_, FlowError>(())
//! });
//!
//! assert_eq!(p.name(), "ticks");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bind::Emitter;
use crate::error::FlowError;
use crate::flow::produce::Produce;

/// Function-backed producer implementation.
///
/// Wraps a closure that *creates* a new future per subscription.
pub struct ProduceFn<T, F> {
    name: Cow<'static, str>,
    f: F,
    _item: PhantomData<fn(T)>,
}

impl<T, F> ProduceFn<T, F> {
    /// Creates a new function-backed producer.
    ///
    /// Prefer [`ProduceFn::arc`] when you immediately need a
    /// [`ProducerRef`](crate::ProducerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _item: PhantomData,
        }
    }

    /// Creates the producer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<T, F, Fut> Produce for ProduceFn<T, F>
where
    T: Send + 'static,
    F: Fn(Emitter<T>, CancellationToken) -> Fut + Send + Sync + 'static, // Fn, not FnMut
    Fut: Future<Output = Result<(), FlowError>> + Send + 'static,
{
    type Item = T;

    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, out: Emitter<T>, ctx: CancellationToken) -> Result<(), FlowError> {
        (self.f)(out, ctx).await
    }
}
