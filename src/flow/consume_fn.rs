//! # Closure-backed consumer (`ConsumeFn`)
//!
//! [`ConsumeFn`] builds a [`Consume`] implementation from plain closures,
//! useful for tests and small call sites that do not warrant a named type.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use scopebind::{Consume, ConsumeFn};
//!
//! let sink = ConsumeFn::new(|item: u32| println!("got {item}"))
//!     .when_complete(|| println!("done"))
//!     .when_error(|err| eprintln!("failed: {err}"))
//!     .arc();
//!
//! sink.on_item(7);
//! ```

use std::sync::Arc;

use crate::error::FlowError;
use crate::flow::consume::Consume;

type ItemFn<T> = Box<dyn Fn(T) + Send + Sync>;
type CompleteFn = Box<dyn Fn() + Send + Sync>;
type ErrorFn = Box<dyn Fn(FlowError) + Send + Sync>;

/// Closure-backed consumer.
///
/// The item handler is mandatory; terminal handlers default to no-ops.
pub struct ConsumeFn<T> {
    item: ItemFn<T>,
    complete: Option<CompleteFn>,
    error: Option<ErrorFn>,
}

impl<T: Send + 'static> ConsumeFn<T> {
    /// Creates a consumer from an item handler.
    pub fn new(on_item: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            item: Box::new(on_item),
            complete: None,
            error: None,
        }
    }

    /// Attaches a completion handler.
    pub fn when_complete(mut self, on_complete: impl Fn() + Send + Sync + 'static) -> Self {
        self.complete = Some(Box::new(on_complete));
        self
    }

    /// Attaches a terminal-error handler.
    pub fn when_error(mut self, on_error: impl Fn(FlowError) + Send + Sync + 'static) -> Self {
        self.error = Some(Box::new(on_error));
        self
    }

    /// Returns the consumer as a shared handle.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<T: Send + 'static> Consume<T> for ConsumeFn<T> {
    fn on_item(&self, item: T) {
        (self.item)(item);
    }

    fn on_complete(&self) {
        if let Some(f) = &self.complete {
            f();
        }
    }

    fn on_error(&self, err: FlowError) {
        if let Some(f) = &self.error {
            f(err);
        }
    }
}
