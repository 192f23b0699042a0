//! Cooperative cancellation
//!
//! Every row-oriented loop calls [`CancellationToken::check`] at each row
//! boundary. Tokens are cheap to clone; clones observe the same flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::error::{Error, Result};

#[derive(Debug, Default)]
struct TokenState {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    parent: Option<CancellationToken>,
}

/// Shared cancellation signal with an optional deadline.
///
/// A child token is cancelled when its parent is, but cancelling a child
/// leaves the parent untouched.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    state: Arc<TokenState>,
}

impl CancellationToken {
    /// Token that is only cancelled explicitly
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that expires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            state: Arc::new(TokenState {
                deadline: Some(deadline),
                ..TokenState::default()
            }),
        }
    }

    /// Token that expires after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Derive a token that also observes this one
    pub fn child(&self) -> Self {
        Self {
            state: Arc::new(TokenState {
                parent: Some(self.clone()),
                ..TokenState::default()
            }),
        }
    }

    /// Signal cancellation to every clone and child
    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::Release);
    }

    /// Returns whether the token was cancelled or its deadline passed
    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }

    /// `Err(Cancelled)` or `Err(DeadlineExceeded)` once the token fired.
    pub fn check(&self) -> Result<()> {
        if self.state.cancelled.load(Ordering::Acquire) {
            return Err(Error::Cancelled);
        }
        if let Some(deadline) = self.state.deadline {
            if Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded);
            }
        }
        match &self.state.parent {
            Some(parent) => parent.check(),
            None => Ok(()),
        }
    }
}
