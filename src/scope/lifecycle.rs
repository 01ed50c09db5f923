//! # Lifecycle-aware scope resolution.
//!
//! Adapts objects that expose a lifecycle-position stream plus a
//! correspondence mapping into the canonical scope signal.
//!
//! ## Resolution
//! ```text
//! resolve_scope():
//!   ├─► current()  == None            → ScopeError::NotStarted
//!   ├─► end_for(current)  fails       → ScopeError::AlreadyEnded
//!   └─► Ok(target) → spawn watcher:
//!         ├─ position == target       → signal.complete()
//!         ├─ end_for(position) fails  → signal.complete()   (moved past the end)
//!         ├─ stream closed            → signal.complete()   (host dropped)
//!         └─ anything else            → keep watching
//! ```
//!
//! ## Rules
//! - The current position is read **once**, at resolution time (a snapshot,
//!   not a live binding).
//! - The position stream replays the most recent value to new subscribers;
//!   positions superseded between observations are never seen, which is why
//!   the watcher also completes when the mapping of a newer position fails.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::ScopeError;
use crate::signal::ScopeSignal;

/// Lifecycle-aware scope provider capability.
///
/// Exposes the three pieces resolution needs: a most-recent-value-replay
/// stream of positions, a correspondence mapping from a position to its end
/// counterpart, and a synchronous accessor for the current position.
///
/// # Example
/// ```
/// use tokio::sync::watch;
/// use scopebind::{LifecycleSource, ScopeError};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Phase { Attached, Detached }
///
/// struct View {
///     positions: watch::Sender<Option<Phase>>,
/// }
///
/// impl LifecycleSource for View {
///     type Position = Phase;
///
///     fn positions(&self) -> watch::Receiver<Option<Phase>> {
///         self.positions.subscribe()
///     }
///
///     fn end_for(&self, position: Phase) -> Result<Phase, ScopeError> {
///         match position {
///             Phase::Attached => Ok(Phase::Detached),
///             Phase::Detached => Err(ScopeError::AlreadyEnded),
///         }
///     }
/// }
/// ```
pub trait LifecycleSource: Send + Sync + 'static {
    /// Discrete lifecycle position value.
    type Position: Clone + PartialEq + Send + Sync + fmt::Debug + 'static;

    /// Returns the position stream.
    ///
    /// Semantics: most-recent-value replay to new subscribers; `None` until
    /// the lifecycle has emitted its first position.
    fn positions(&self) -> watch::Receiver<Option<Self::Position>>;

    /// Correspondence mapping: the position at which a scope opened *now*
    /// should end.
    ///
    /// Must be total over every position reachable at resolution time; a
    /// position past the end of the lifecycle fails with
    /// [`ScopeError::AlreadyEnded`].
    fn end_for(&self, position: Self::Position) -> Result<Self::Position, ScopeError>;

    /// Synchronous snapshot of the current position.
    fn current(&self) -> Option<Self::Position> {
        self.positions().borrow().clone()
    }
}

/// Object-safe resolution seam over any [`LifecycleSource`].
///
/// This is what [`ScopeSource::Lifecycle`](crate::ScopeSource) stores; the
/// blanket impl below erases the position type once, at binding time.
pub trait ScopedLifecycle: Send + Sync + 'static {
    /// Derives the canonical scope signal from the current lifecycle
    /// position, or fails with a boundary violation.
    fn resolve_scope(self: Arc<Self>) -> Result<ScopeSignal, ScopeError>;
}

impl<S: LifecycleSource> ScopedLifecycle for S {
    fn resolve_scope(self: Arc<Self>) -> Result<ScopeSignal, ScopeError> {
        let position = self.current().ok_or(ScopeError::NotStarted)?;
        let target = self.end_for(position)?;

        let signal = ScopeSignal::new();
        let out = signal.clone();
        let mut rx = self.positions();
        rx.mark_unchanged();

        // The watcher must not keep the host alive: it holds a weak reference
        // for mapping checks, so a dropped host still ends the scope.
        let host = Arc::downgrade(&self);

        tokio::spawn(async move {
            loop {
                if rx.changed().await.is_err() {
                    // Host dropped its sender: the lifecycle is over.
                    out.complete();
                    break;
                }
                let observed = rx.borrow_and_update().clone();
                match observed {
                    Some(position) if position == target => {
                        out.complete();
                        break;
                    }
                    Some(position) => {
                        // The stream replays only the most recent position; a
                        // failing mapping means we skipped past the target.
                        match host.upgrade() {
                            Some(host) if host.end_for(position).is_ok() => {}
                            _ => {
                                out.complete();
                                break;
                            }
                        }
                    }
                    None => {}
                }
            }
        });

        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalState;
    use tokio::time::{sleep, Duration};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Created,
        Started,
        Stopped,
        Destroyed,
    }

    struct Host {
        tx: watch::Sender<Option<Phase>>,
    }

    impl Host {
        fn arc(initial: Option<Phase>) -> Arc<Self> {
            let (tx, _rx) = watch::channel(initial);
            Arc::new(Self { tx })
        }

        fn advance(&self, phase: Phase) {
            let _ = self.tx.send(Some(phase));
        }
    }

    impl LifecycleSource for Host {
        type Position = Phase;

        fn positions(&self) -> watch::Receiver<Option<Phase>> {
            self.tx.subscribe()
        }

        fn end_for(&self, position: Phase) -> Result<Phase, ScopeError> {
            match position {
                Phase::Created => Ok(Phase::Destroyed),
                Phase::Started => Ok(Phase::Stopped),
                Phase::Stopped => Ok(Phase::Destroyed),
                Phase::Destroyed => Err(ScopeError::AlreadyEnded),
            }
        }
    }

    async fn settle(signal: &ScopeSignal) -> SignalState {
        for _ in 0..50 {
            if signal.is_terminal() {
                break;
            }
            sleep(Duration::from_millis(2)).await;
        }
        signal.state()
    }

    #[tokio::test]
    async fn test_not_started_violation() {
        let host = Host::arc(None);
        let err = host.resolve_scope().unwrap_err();
        assert_eq!(err, ScopeError::NotStarted);
    }

    #[tokio::test]
    async fn test_already_ended_violation() {
        let host = Host::arc(Some(Phase::Destroyed));
        let err = host.resolve_scope().unwrap_err();
        assert_eq!(err, ScopeError::AlreadyEnded);
    }

    #[tokio::test]
    async fn test_signal_completes_on_target_position() {
        let host = Host::arc(Some(Phase::Started));
        let signal = host.clone().resolve_scope().unwrap();
        assert_eq!(signal.state(), SignalState::Pending);

        host.advance(Phase::Stopped);
        assert_eq!(settle(&signal).await, SignalState::Ended);
    }

    #[tokio::test]
    async fn test_signal_ignores_non_target_positions() {
        let host = Host::arc(Some(Phase::Created));
        let signal = host.clone().resolve_scope().unwrap();

        host.advance(Phase::Started);
        sleep(Duration::from_millis(10)).await;
        host.advance(Phase::Stopped);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(signal.state(), SignalState::Pending);

        host.advance(Phase::Destroyed);
        assert_eq!(settle(&signal).await, SignalState::Ended);
    }

    #[tokio::test]
    async fn test_signal_completes_when_skipped_past_end() {
        let host = Host::arc(Some(Phase::Started));
        let signal = host.clone().resolve_scope().unwrap();

        // Target is Stopped, but the replayed stream only ever shows
        // Destroyed; the failing mapping stands in for the skipped target.
        host.advance(Phase::Destroyed);
        assert_eq!(settle(&signal).await, SignalState::Ended);
    }

    #[tokio::test]
    async fn test_signal_completes_when_host_drops() {
        let host = Host::arc(Some(Phase::Started));
        let signal = host.clone().resolve_scope().unwrap();

        drop(host);
        assert_eq!(settle(&signal).await, SignalState::Ended);
    }

    #[tokio::test]
    async fn test_snapshot_is_taken_at_resolution_time() {
        let host = Host::arc(Some(Phase::Created));
        let signal = host.clone().resolve_scope().unwrap();

        // The scope opened at Created, so only Destroyed ends it - a later
        // Stopped position belongs to a different scope window.
        host.advance(Phase::Stopped);
        sleep(Duration::from_millis(10)).await;
        assert_eq!(signal.state(), SignalState::Pending);
    }
}
