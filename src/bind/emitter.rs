//! # Producer-facing forward gate.
//!
//! [`Emitter`] is the only way a producer can push values downstream. Every
//! emission re-checks the disposal phase, so a producer that keeps running
//! after the scope ended can no longer reach the consumer.

use std::sync::Arc;

use crate::bind::gate::Gate;

/// Handle a producer uses to emit values into its binding.
///
/// Cheap to clone; all clones feed the same binding.
pub struct Emitter<T> {
    gate: Arc<Gate<T>>,
}

impl<T: Send + 'static> Emitter<T> {
    pub(crate) fn new(gate: Arc<Gate<T>>) -> Self {
        Self { gate }
    }

    /// Forwards one value downstream.
    ///
    /// Returns `false` once the binding left ACTIVE; the value is dropped and
    /// the producer should stop emitting.
    pub fn emit(&self, item: T) -> bool {
        self.gate.forward(item)
    }

    /// True while the binding still forwards values.
    pub fn is_live(&self) -> bool {
        self.gate.core().is_active()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            gate: Arc::clone(&self.gate),
        }
    }
}
