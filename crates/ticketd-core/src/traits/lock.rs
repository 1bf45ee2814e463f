//! Distributed, token-owned seat lock.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::{AppError, ErrorKind};

/// Errors reported by a [`SeatLockManager`].
#[derive(Debug, Error)]
pub enum LockError {
    /// The lock is held by a different token.
    #[error("lock already taken")]
    AlreadyTaken,
    /// Release was attempted with a token that does not own the lock.
    #[error("unlock not permitted")]
    UnlockNotPermitted,
    /// The backend failed (connection, script error, unexpected reply).
    #[error("lock backend error: {0}")]
    Backend(String),
}

impl From<LockError> for AppError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::AlreadyTaken => AppError::seat_locked(),
            LockError::UnlockNotPermitted => {
                AppError::with_source(ErrorKind::Conflict, "Seat unlock denied", err)
            }
            LockError::Backend(_) => {
                AppError::with_source(ErrorKind::Internal, "Seat lock backend failed", err)
            }
        }
    }
}

/// Proof of a successful acquire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockLease {
    /// The lock key.
    pub key: String,
    /// The owner token stored under the key.
    pub token: String,
    /// The TTL that was (re-)applied.
    pub ttl: Duration,
}

/// A distributed mutex keyed per seat, owned by a token, expiring on a TTL.
///
/// Acquire is reentrant by token: the current owner re-acquiring refreshes
/// the TTL instead of failing. An expired lock is free for anyone.
#[async_trait]
pub trait SeatLockManager: Send + Sync + std::fmt::Debug + 'static {
    /// Acquire (or renew) the lock on `key` for `token`.
    ///
    /// Fails with [`LockError::AlreadyTaken`] if a different token holds it.
    async fn acquire(&self, key: &str, ttl: Duration, token: &str)
    -> Result<LockLease, LockError>;

    /// Release the lock on `key` held by `token`.
    ///
    /// Releasing a lock that does not exist succeeds. Fails with
    /// [`LockError::UnlockNotPermitted`] if a different token holds it.
    async fn release(&self, key: &str, token: &str) -> Result<(), LockError>;
}
