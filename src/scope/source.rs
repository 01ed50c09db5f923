//! # Scope source variants and the provider capability.
//!
//! [`ScopeSource`] is a closed tagged variant over the three ways calling code
//! can hand a scope to [`bind_to_scope`](crate::bind_to_scope). The variant is
//! resolved exactly once at binding time; there is no runtime re-dispatch.

use std::sync::Arc;

use crate::error::ScopeError;
use crate::scope::lifecycle::{LifecycleSource, ScopedLifecycle};
use crate::signal::ScopeSignal;

/// Fallible scope-provider capability.
///
/// `request_scope` is invoked once per binding, synchronously, before the
/// producer is subscribed. A failure is a scope-boundary violation and is
/// routed through the violation routing policy.
///
/// # Example
/// ```
/// use scopebind::{ProvideScope, ScopeError, ScopeSignal};
///
/// struct Session {
///     scope: ScopeSignal,
///     closed: bool,
/// }
///
/// impl ProvideScope for Session {
///     fn request_scope(&self) -> Result<ScopeSignal, ScopeError> {
///         if self.closed {
///             return Err(ScopeError::request("session closed"));
///         }
///         Ok(self.scope.clone())
///     }
/// }
/// ```
pub trait ProvideScope: Send + Sync + 'static {
    /// Produces the scope signal for one binding, or fails with a violation.
    fn request_scope(&self) -> Result<ScopeSignal, ScopeError>;
}

/// A scope, in whichever form the caller has it.
///
/// Constructed via `From<ScopeSignal>`, [`ScopeSource::provider`], or
/// [`ScopeSource::lifecycle`].
#[derive(Clone)]
pub enum ScopeSource {
    /// An already-canonical scope signal.
    Ready(ScopeSignal),
    /// A provider that is asked for a signal at binding time.
    Provider(Arc<dyn ProvideScope>),
    /// A lifecycle-aware provider; resolution derives the signal from the
    /// current lifecycle position.
    Lifecycle(Arc<dyn ScopedLifecycle>),
}

impl ScopeSource {
    /// Wraps a provider capability.
    pub fn provider(provider: Arc<dyn ProvideScope>) -> Self {
        ScopeSource::Provider(provider)
    }

    /// Wraps a lifecycle-aware provider.
    pub fn lifecycle<S: LifecycleSource>(source: Arc<S>) -> Self {
        ScopeSource::Lifecycle(source)
    }
}

impl From<ScopeSignal> for ScopeSource {
    fn from(signal: ScopeSignal) -> Self {
        ScopeSource::Ready(signal)
    }
}

impl std::fmt::Debug for ScopeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeSource::Ready(signal) => f.debug_tuple("Ready").field(signal).finish(),
            ScopeSource::Provider(_) => f.write_str("Provider(..)"),
            ScopeSource::Lifecycle(_) => f.write_str("Lifecycle(..)"),
        }
    }
}
