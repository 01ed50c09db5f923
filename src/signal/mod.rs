//! Canonical scope signal: the single-shot, value-less completion source.
//!
//! Every scope, however it was obtained, resolves to a [`ScopeSignal`] before
//! a binding is established. The signal either ends (`complete`) or errors
//! (`fail`) exactly once and never carries a data payload.
//!
//! ## Contents
//! - [`ScopeSignal`] the completion source itself
//! - [`SignalState`] pending / ended / errored
//! - [`ScopeOutcome`] what a subscriber observes when the signal terminates

mod scope_signal;

pub use scope_signal::{ScopeOutcome, ScopeSignal, SignalState};
