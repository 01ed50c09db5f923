//! # Subscription cancel capability.
//!
//! [`SubscriptionHandle`] is the opaque "cancel" capability the coordinator
//! holds for each of its two subscriptions (producer side and scope side).
//!
//! ## Rules
//! - `cancel()` is idempotent and safe from any thread.
//! - Cancellation is best-effort and non-throwing; observers react through
//!   the wrapped token.

use tokio_util::sync::CancellationToken;

/// Opaque, idempotent cancel capability for one subscription side.
///
/// Cloning yields a handle to the same subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionHandle {
    token: CancellationToken,
}

impl SubscriptionHandle {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Cancels the subscription. Calling this more than once has no
    /// additional effect.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// True once the subscription was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token observed by the cancelled side (producer `ctx`, scope watcher).
    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}
