//! # Single-shot scope completion source.
//!
//! [`ScopeSignal`] marks the end of a scope's validity. It transitions exactly
//! once, irreversibly, from pending to ended or errored; all clones observe
//! the same terminal outcome.
//!
//! ## Rules
//! - The terminal transition is won by exactly one `complete`/`fail` call;
//!   every later call is a no-op and reports that it lost.
//! - The signal never carries a data value; an errored signal carries only a
//!   failure reason.
//! - Waiting via [`ScopeSignal::outcome`] is cancel-safe and may be awaited by
//!   any number of subscribers.

use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio_util::sync::CancellationToken;

const PENDING: u8 = 0;
const ENDED: u8 = 1;
const ERRORED: u8 = 2;

/// Observable state of a [`ScopeSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    /// The scope is still valid.
    Pending,
    /// The scope ended normally.
    Ended,
    /// The scope ended with an error.
    Errored,
}

/// Terminal outcome observed by a subscriber of a [`ScopeSignal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOutcome {
    /// The scope ended normally; the binding severs silently.
    Ended,
    /// The scope errored; the reason becomes the consumer's terminal error.
    Errored(Arc<str>),
}

struct Inner {
    state: AtomicU8,
    reason: OnceLock<Arc<str>>,
    done: CancellationToken,
}

/// Single-shot, value-less completion source marking the end of a scope.
///
/// Cheap to clone; all clones share the same terminal state. The side that
/// owns the scope calls [`complete`](ScopeSignal::complete) or
/// [`fail`](ScopeSignal::fail); the coordinator only subscribes.
///
/// # Example
/// ```
/// use scopebind::{ScopeSignal, SignalState};
///
/// let signal = ScopeSignal::new();
/// assert_eq!(signal.state(), SignalState::Pending);
///
/// assert!(signal.complete());
/// assert!(!signal.complete()); // single-shot: second call loses
/// assert_eq!(signal.state(), SignalState::Ended);
/// ```
#[derive(Clone)]
pub struct ScopeSignal {
    inner: Arc<Inner>,
}

impl ScopeSignal {
    /// Creates a new pending signal.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: AtomicU8::new(PENDING),
                reason: OnceLock::new(),
                done: CancellationToken::new(),
            }),
        }
    }

    /// Marks the scope as ended.
    ///
    /// Returns `true` if this call won the terminal transition, `false` if
    /// the signal was already terminal. Safe to call from any thread.
    pub fn complete(&self) -> bool {
        let won = self
            .inner
            .state
            .compare_exchange(PENDING, ENDED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.inner.done.cancel();
        }
        won
    }

    /// Marks the scope as errored with the given reason.
    ///
    /// Returns `true` if this call won the terminal transition. Only the
    /// winning call's reason is retained.
    pub fn fail(&self, reason: impl Into<Arc<str>>) -> bool {
        let won = self
            .inner
            .state
            .compare_exchange(PENDING, ERRORED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            // Sole writer: only the CAS winner reaches this line.
            let _ = self.inner.reason.set(reason.into());
            self.inner.done.cancel();
        }
        won
    }

    /// Returns the current state of the signal.
    pub fn state(&self) -> SignalState {
        match self.inner.state.load(Ordering::Acquire) {
            ENDED => SignalState::Ended,
            ERRORED => SignalState::Errored,
            _ => SignalState::Pending,
        }
    }

    /// True once the signal reached a terminal state.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state() != SignalState::Pending
    }

    /// Returns the failure reason, if the signal errored.
    pub fn reason(&self) -> Option<Arc<str>> {
        match self.state() {
            SignalState::Errored => self.inner.reason.get().cloned(),
            _ => None,
        }
    }

    /// Waits until the signal terminates and reports the outcome.
    ///
    /// Resolves immediately for an already-terminal signal. Cancel-safe:
    /// dropping the future has no effect on the signal.
    pub async fn outcome(&self) -> ScopeOutcome {
        self.inner.done.cancelled().await;
        match self.state() {
            SignalState::Errored => {
                let reason = self
                    .inner
                    .reason
                    .get()
                    .cloned()
                    .unwrap_or_else(|| Arc::from("scope error"));
                ScopeOutcome::Errored(reason)
            }
            _ => ScopeOutcome::Ended,
        }
    }
}

impl Default for ScopeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ScopeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeSignal")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_signal_is_pending() {
        let s = ScopeSignal::new();
        assert_eq!(s.state(), SignalState::Pending);
        assert!(!s.is_terminal());
        assert_eq!(s.reason(), None);
    }

    #[test]
    fn test_complete_wins_once() {
        let s = ScopeSignal::new();
        assert!(s.complete());
        assert!(!s.complete());
        assert!(!s.fail("late"));
        assert_eq!(s.state(), SignalState::Ended);
        assert_eq!(s.reason(), None);
    }

    #[test]
    fn test_fail_retains_winning_reason() {
        let s = ScopeSignal::new();
        assert!(s.fail("first"));
        assert!(!s.fail("second"));
        assert_eq!(s.state(), SignalState::Errored);
        assert_eq!(s.reason().as_deref(), Some("first"));
    }

    #[test]
    fn test_clones_share_state() {
        let s = ScopeSignal::new();
        let c = s.clone();
        assert!(c.complete());
        assert_eq!(s.state(), SignalState::Ended);
    }

    #[tokio::test]
    async fn test_outcome_resolves_on_complete() {
        let s = ScopeSignal::new();
        let waiter = s.clone();
        let handle = tokio::spawn(async move { waiter.outcome().await });
        s.complete();
        assert_eq!(handle.await.unwrap(), ScopeOutcome::Ended);
    }

    #[tokio::test]
    async fn test_outcome_resolves_on_fail_with_reason() {
        let s = ScopeSignal::new();
        let waiter = s.clone();
        let handle = tokio::spawn(async move { waiter.outcome().await });
        s.fail("detached");
        assert_eq!(
            handle.await.unwrap(),
            ScopeOutcome::Errored(Arc::from("detached"))
        );
    }

    #[tokio::test]
    async fn test_outcome_immediate_for_terminal_signal() {
        let s = ScopeSignal::new();
        s.complete();
        assert_eq!(s.outcome().await, ScopeOutcome::Ended);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_terminal_race_has_one_winner() {
        for _ in 0..64 {
            let s = ScopeSignal::new();
            let a = s.clone();
            let b = s.clone();
            let ja = tokio::spawn(async move { a.complete() });
            let jb = tokio::spawn(async move { b.fail("race") });
            let (wa, wb) = (ja.await.unwrap(), jb.await.unwrap());
            assert!(wa ^ wb, "exactly one side must win the transition");
        }
    }
}
