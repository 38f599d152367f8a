//! Cancellation and deadlines for a single logical call.
//!
//! A [`RequestContext`] is attached to a request with
//! [`CallOption::Context`](crate::clients::CallOption::Context). The
//! executor checks it before every attempt and races both the in-flight
//! exchange and each backoff sleep against it.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::clients::{CallOption, RequestContext};
//! use std::time::Duration;
//!
//! let ctx = RequestContext::with_timeout(Duration::from_secs(2));
//! let databases = client
//!     .read_databases(&[CallOption::Context(ctx.clone())])
//!     .await?;
//! ```

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context stopped a request.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// [`RequestContext::cancel`] was called.
    #[error("context canceled")]
    Canceled,
    /// The deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// A cancellation token with an optional deadline.
///
/// Clones share the same token, so cancelling any clone cancels them all.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Creates a context that only ends when cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context bound to an existing token.
    #[must_use]
    pub const fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Creates a context that expires after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Creates a context that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Returns a context cancelled together with this one, optionally with
    /// an earlier deadline.
    #[must_use]
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let deadline = match (self.deadline, timeout) {
            (Some(parent), Some(t)) => Some(parent.min(Instant::now() + t)),
            (None, Some(t)) => Some(Instant::now() + t),
            (parent, None) => parent,
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    /// Cancels this context and every clone and child of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the underlying token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns why the context is done, or `None` while it is still live.
    #[must_use]
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Canceled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Completes once the context is done.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                () = self.token.cancelled() => ContextError::Canceled,
                () = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Canceled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_is_live() {
        assert_eq!(RequestContext::new().err(), None);
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let ctx = RequestContext::new();
        let clone = ctx.clone();
        ctx.cancel();
        assert_eq!(clone.err(), Some(ContextError::Canceled));
        assert_eq!(clone.err().unwrap().to_string(), "context canceled");
    }

    #[test]
    fn test_child_is_cancelled_by_parent_only() {
        let parent = RequestContext::new();
        let child = parent.child(None);
        child.cancel();
        assert_eq!(parent.err(), None);

        let child = parent.child(None);
        parent.cancel();
        assert_eq!(child.err(), Some(ContextError::Canceled));
    }

    #[tokio::test]
    async fn test_deadline_in_the_past_is_exceeded() {
        let ctx = RequestContext::with_deadline(Instant::now());
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
        assert_eq!(ctx.done().await, ContextError::DeadlineExceeded);
        assert_eq!(
            ContextError::DeadlineExceeded.to_string(),
            "context deadline exceeded"
        );
    }

    #[tokio::test]
    async fn test_done_resolves_on_cancel() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(60));
        let waiter = ctx.clone();
        let handle = tokio::spawn(async move { waiter.done().await });
        ctx.cancel();
        assert_eq!(handle.await.unwrap(), ContextError::Canceled);
    }

    #[test]
    fn test_child_keeps_earlier_deadline() {
        let parent = RequestContext::with_timeout(Duration::from_millis(10));
        let child = parent.child(Some(Duration::from_secs(60)));
        assert_eq!(child.deadline(), parent.deadline());
    }
}
