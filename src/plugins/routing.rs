//! # Process-wide violation routing policy.
//!
//! A scope-boundary violation is always routed through exactly one policy
//! before it can reach a consumer. The policy decides whether to suppress the
//! violation (the binding becomes a silent no-op), deliver it unchanged, or
//! deliver a transformed violation in its place.
//!
//! ## Rules
//! - The process-wide router is replaceable at any time; swaps are
//!   last-writer-wins with no ordering guarantee relative to in-flight
//!   resolutions.
//! - A per-binding router (see [`Bound::with_router`](crate::Bound::with_router))
//!   takes precedence over the process-wide one.
//! - Routing runs synchronously, once per violation, on the resolving thread.
//! - With no router registered the policy is the identity: deliver unchanged.

use std::backtrace::Backtrace;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::ScopeError;

/// A boundary violation as seen by the routing policy.
///
/// Carries the violation itself plus an optional call-site trace, captured
/// only while [`trace_capture`] is enabled.
#[derive(Debug, Clone)]
pub struct Violation {
    /// The violation being routed.
    pub error: ScopeError,
    /// Formatted call-site trace, if capture was enabled at raise time.
    pub trace: Option<Arc<str>>,
}

/// Verdict of a [`RouteViolations`] policy.
#[derive(Debug, Clone)]
pub enum Routing {
    /// Swallow the violation: no error reaches the consumer and the
    /// subscription simply never starts.
    Suppress,
    /// Deliver this violation (the original, or a substitute) to the consumer.
    Deliver(ScopeError),
}

/// Routing policy for scope-boundary violations.
///
/// Implementations must be cheap and non-blocking: routing runs synchronously
/// on the thread performing scope resolution.
///
/// # Example
/// ```
/// use scopebind::{RouteViolations, Routing, ScopeError, Violation};
///
/// /// Suppresses "not started" violations, delivers everything else.
/// struct Lenient;
///
/// impl RouteViolations for Lenient {
///     fn route(&self, violation: Violation) -> Routing {
///         match violation.error {
///             ScopeError::NotStarted => Routing::Suppress,
///             other => Routing::Deliver(other),
///         }
///     }
/// }
/// ```
pub trait RouteViolations: Send + Sync + 'static {
    /// Decides the fate of one violation.
    fn route(&self, violation: Violation) -> Routing;
}

/// Plain handler functions are routing policies.
///
/// ```
/// use std::sync::Arc;
/// use scopebind::{RouteViolations, Routing, Violation};
///
/// let identity: Arc<dyn RouteViolations> =
///     Arc::new(|violation: Violation| Routing::Deliver(violation.error));
/// ```
impl<F> RouteViolations for F
where
    F: Fn(Violation) -> Routing + Send + Sync + 'static,
{
    fn route(&self, violation: Violation) -> Routing {
        (self)(violation)
    }
}

static ROUTER: RwLock<Option<Arc<dyn RouteViolations>>> = RwLock::new(None);
static CAPTURE_TRACE: AtomicBool = AtomicBool::new(false);

/// Replaces the process-wide routing policy.
///
/// Last-writer-wins; in-flight resolutions may observe either the old or the
/// new policy.
pub fn set_router(router: Arc<dyn RouteViolations>) {
    if let Ok(mut slot) = ROUTER.write() {
        *slot = Some(router);
    }
}

/// Removes the process-wide routing policy, restoring identity routing.
pub fn reset_router() {
    if let Ok(mut slot) = ROUTER.write() {
        *slot = None;
    }
}

/// Enables or disables call-site trace capture on violations.
///
/// Purely a diagnostics/performance trade-off: the trace never influences
/// routing outcomes. Disabled by default.
pub fn set_trace_capture(enabled: bool) {
    CAPTURE_TRACE.store(enabled, Ordering::Relaxed);
}

/// Returns whether call-site trace capture is currently enabled.
pub fn trace_capture() -> bool {
    CAPTURE_TRACE.load(Ordering::Relaxed)
}

fn current_router() -> Option<Arc<dyn RouteViolations>> {
    ROUTER.read().ok().and_then(|slot| slot.clone())
}

/// Routes one violation through the effective policy.
///
/// `router` is the per-binding override; `capture` overrides the process-wide
/// trace toggle. Falls back to the process-wide defaults when `None`.
pub(crate) fn route(
    error: ScopeError,
    router: Option<&Arc<dyn RouteViolations>>,
    capture: Option<bool>,
) -> Routing {
    let capture = capture.unwrap_or_else(trace_capture);
    let trace = if capture {
        Some(Arc::from(Backtrace::force_capture().to_string()))
    } else {
        None
    };
    let violation = Violation { error, trace };

    match router.cloned().or_else(current_router) {
        Some(policy) => policy.route(violation),
        None => Routing::Deliver(violation.error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every routed violation and applies a fixed verdict.
    struct Recorder {
        seen: Mutex<Vec<Violation>>,
        verdict: fn(ScopeError) -> Routing,
    }

    impl Recorder {
        fn arc(verdict: fn(ScopeError) -> Routing) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                verdict,
            })
        }
    }

    impl RouteViolations for Recorder {
        fn route(&self, violation: Violation) -> Routing {
            let error = violation.error.clone();
            self.seen.lock().unwrap().push(violation);
            (self.verdict)(error)
        }
    }

    #[test]
    fn test_default_routing_is_identity() {
        let routing = route(ScopeError::NotStarted, None, None);
        match routing {
            Routing::Deliver(ScopeError::NotStarted) => {}
            other => panic!("expected identity delivery, got {other:?}"),
        }
    }

    #[test]
    fn test_override_router_takes_precedence() {
        let recorder = Recorder::arc(|_| Routing::Suppress);
        let router: Arc<dyn RouteViolations> = recorder.clone();
        let routing = route(ScopeError::AlreadyEnded, Some(&router), None);
        assert!(matches!(routing, Routing::Suppress));
        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_router_can_transform_violation() {
        let recorder = Recorder::arc(|_| Routing::Deliver(ScopeError::request("mapped")));
        let router: Arc<dyn RouteViolations> = recorder;
        match route(ScopeError::NotStarted, Some(&router), None) {
            Routing::Deliver(ScopeError::Request { reason }) => {
                assert_eq!(reason.as_ref(), "mapped");
            }
            other => panic!("expected transformed delivery, got {other:?}"),
        }
    }

    #[test]
    fn test_trace_override_controls_capture() {
        let recorder = Recorder::arc(|e| Routing::Deliver(e));
        let router: Arc<dyn RouteViolations> = recorder.clone();

        let _ = route(ScopeError::NotStarted, Some(&router), Some(false));
        let _ = route(ScopeError::NotStarted, Some(&router), Some(true));

        let seen = recorder.seen.lock().unwrap();
        assert!(seen[0].trace.is_none());
        assert!(seen[1].trace.is_some());
    }
}
