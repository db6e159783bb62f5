//! Set-once cancellation signal.
//!
//! A [`Signal`] starts inactive and becomes active exactly once; it is never reset.
//! Observers can poll it ([`Cancel::is_cancelled`]) or wait for it ([`Cancel::cancelled`]).
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Anything a bounded task can observe for cancellation.
#[async_trait]
pub trait Cancel: Send + Sync {
    /// Non-blocking poll.
    fn is_cancelled(&self) -> bool;

    /// Resolves once cancellation is active; immediately if it already is.
    async fn cancelled(&self);
}

/// Cloneable single-assignment flag with wait/notify.
///
/// All clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Signal {
    inner: Arc<SignalInner>,
}

#[derive(Debug, Default)]
struct SignalInner {
    assigned: AtomicBool,
    token: CancellationToken,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the signal.
    ///
    /// Returns `true` only for the call that performed the assignment.
    pub fn set(&self) -> bool {
        if self.inner.assigned.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.inner.token.cancel();
        trace!("signal set");
        true
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.inner.token.is_cancelled()
    }

    pub async fn wait(&self) {
        self.inner.token.cancelled().await
    }
}

#[async_trait]
impl Cancel for Signal {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.is_set()
    }

    async fn cancelled(&self) {
        self.wait().await
    }
}

#[async_trait]
impl Cancel for CancellationToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }

    async fn cancelled(&self) {
        CancellationToken::cancelled(self).await
    }
}
