//! Error types used by scope resolution and bound subscriptions.
//!
//! This module defines two main error enums:
//!
//! - [`ScopeError`] — scope-boundary violations raised while resolving a scope.
//! - [`FlowError`] — terminal errors delivered to a consumer after a binding
//!   was established.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//! A [`ScopeError`] is always raised *before* the producer is subscribed; a
//! [`FlowError`] is always the single terminal signal of an active binding.

use std::sync::Arc;
use thiserror::Error;

/// # Scope-boundary violations.
///
/// Raised when a scope source cannot produce a valid end-of-scope signal.
/// Violations are routed through the process-wide routing policy
/// (see [`RouteViolations`](crate::RouteViolations)) before they ever reach a
/// consumer; the policy may suppress them entirely.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// The lifecycle source has not emitted any position yet.
    #[error("lifecycle has not started")]
    NotStarted,

    /// The lifecycle source has already moved past its end position.
    #[error("lifecycle has already ended")]
    AlreadyEnded,

    /// A scope provider failed to produce a signal.
    #[error("scope request failed: {reason}")]
    Request {
        /// Provider-supplied failure description.
        reason: Arc<str>,
    },
}

impl ScopeError {
    /// Builds a provider-failure violation from any displayable reason.
    pub fn request(reason: impl Into<Arc<str>>) -> Self {
        ScopeError::Request {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use scopebind::ScopeError;
    ///
    /// assert_eq!(ScopeError::NotStarted.as_label(), "scope_not_started");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ScopeError::NotStarted => "scope_not_started",
            ScopeError::AlreadyEnded => "scope_already_ended",
            ScopeError::Request { .. } => "scope_request_failed",
        }
    }

    /// Returns a human-readable message with details about the violation.
    pub fn as_message(&self) -> String {
        match self {
            ScopeError::NotStarted => "lifecycle has not started".to_string(),
            ScopeError::AlreadyEnded => "lifecycle has already ended".to_string(),
            ScopeError::Request { reason } => format!("scope request failed: {reason}"),
        }
    }
}

/// # Terminal errors of a bound subscription.
///
/// A consumer that successfully binds receives *at most one* of these, ever:
/// either the boundary violation that refused the binding, the error the
/// scope signal ended with, or the producer's own failure.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum FlowError {
    /// Scope resolution was refused; the producer was never subscribed.
    #[error("out of scope: {0}")]
    OutOfScope(#[from] ScopeError),

    /// The scope signal errored after a successful resolution.
    #[error("scope ended with error: {reason}")]
    Scope {
        /// Reason carried by the failed scope signal.
        reason: Arc<str>,
    },

    /// The wrapped producer terminated with an error (or panicked).
    #[error("producer failed: {reason}")]
    Producer {
        /// Producer-supplied failure description.
        reason: Arc<str>,
    },
}

impl FlowError {
    /// Builds a producer failure from any displayable reason.
    pub fn producer(reason: impl Into<Arc<str>>) -> Self {
        FlowError::Producer {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use scopebind::FlowError;
    ///
    /// let err = FlowError::producer("boom");
    /// assert_eq!(err.as_label(), "producer_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            FlowError::OutOfScope(_) => "out_of_scope",
            FlowError::Scope { .. } => "scope_errored",
            FlowError::Producer { .. } => "producer_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            FlowError::OutOfScope(v) => format!("out of scope: {}", v.as_message()),
            FlowError::Scope { reason } => format!("scope error: {reason}"),
            FlowError::Producer { reason } => format!("producer error: {reason}"),
        }
    }

    /// True if this terminal originated from a boundary violation.
    ///
    /// # Example
    /// ```
    /// use scopebind::{FlowError, ScopeError};
    ///
    /// assert!(FlowError::OutOfScope(ScopeError::NotStarted).is_violation());
    /// assert!(!FlowError::producer("boom").is_violation());
    /// ```
    pub fn is_violation(&self) -> bool {
        matches!(self, FlowError::OutOfScope(_))
    }
}
