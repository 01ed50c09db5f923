//! # One-shot scope resolution with violation routing.
//!
//! Resolution is evaluated once per binding, before the producer is
//! subscribed, so a failure here guarantees the producer never starts.

use std::sync::Arc;

use crate::error::ScopeError;
use crate::plugins::{self, RouteViolations, Routing};
use crate::scope::source::ScopeSource;
use crate::signal::ScopeSignal;

/// Verdict of resolving one scope source.
pub(crate) enum Resolution {
    /// Resolution succeeded; the coordinator may subscribe both sides.
    Granted(ScopeSignal),
    /// A violation survived routing and must reach the consumer as the
    /// terminal error; the producer is never subscribed.
    Refused(ScopeError),
    /// The routing policy swallowed the violation; the binding is a silent
    /// no-op. Carries the original violation for observability.
    Suppressed(ScopeError),
}

/// Resolves a scope source, routing any boundary violation through the
/// effective policy (`router`/`capture` are the per-binding overrides).
pub(crate) fn resolve(
    source: &ScopeSource,
    router: Option<&Arc<dyn RouteViolations>>,
    capture: Option<bool>,
) -> Resolution {
    let requested = match source {
        ScopeSource::Ready(signal) => Ok(signal.clone()),
        ScopeSource::Provider(provider) => provider.request_scope(),
        ScopeSource::Lifecycle(lifecycle) => Arc::clone(lifecycle).resolve_scope(),
    };

    match requested {
        Ok(signal) => Resolution::Granted(signal),
        Err(violation) => {
            let original = violation.clone();
            match plugins::route(violation, router, capture) {
                Routing::Suppress => Resolution::Suppressed(original),
                Routing::Deliver(err) => Resolution::Refused(err),
            }
        }
    }
}
