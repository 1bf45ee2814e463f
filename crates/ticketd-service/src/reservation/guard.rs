//! Scoped ownership of a seat lock.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use ticketd_core::traits::{LockError, SeatLockManager};

/// A held seat lock that is released unless explicitly retained.
///
/// Call [`SeatLockGuard::retain`] once the reservation is durable; the lock
/// then stays until its TTL runs out and represents the hold. Every other
/// exit goes through [`SeatLockGuard::release`], or through `Drop`, which
/// schedules the release on the current Tokio runtime.
#[must_use = "dropping the guard releases the seat lock"]
pub struct SeatLockGuard {
    locks: Arc<dyn SeatLockManager>,
    key: String,
    token: String,
    armed: bool,
}

impl std::fmt::Debug for SeatLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatLockGuard")
            .field("key", &self.key)
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

impl SeatLockGuard {
    /// Acquire (or renew) `key` for `token`.
    ///
    /// On a backend error the key may or may not have been written, so a
    /// release is attempted before the error is returned.
    pub async fn acquire(
        locks: Arc<dyn SeatLockManager>,
        key: String,
        ttl: Duration,
        token: &str,
    ) -> Result<Self, LockError> {
        match locks.acquire(&key, ttl, token).await {
            Ok(_) => Ok(Self {
                locks,
                key,
                token: token.to_string(),
                armed: true,
            }),
            Err(LockError::AlreadyTaken) => Err(LockError::AlreadyTaken),
            Err(err) => {
                Self {
                    locks,
                    key,
                    token: token.to_string(),
                    armed: true,
                }
                .release()
                .await;
                Err(err)
            }
        }
    }

    /// The lock key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Keep the lock until it expires.
    pub fn retain(mut self) {
        self.armed = false;
        debug!(key = %self.key, "Seat lock retained as hold");
    }

    /// Release the lock now. Failures are logged, not returned.
    pub async fn release(mut self) {
        self.armed = false;
        if let Err(e) = self.locks.release(&self.key, &self.token).await {
            warn!(key = %self.key, error = %e, "Failed to release seat lock");
        }
    }
}

impl Drop for SeatLockGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(
                key = %self.key,
                "Seat lock guard dropped outside a runtime; lock left to expire"
            );
            return;
        };

        let locks = Arc::clone(&self.locks);
        let key = std::mem::take(&mut self.key);
        let token = std::mem::take(&mut self.token);
        handle.spawn(async move {
            if let Err(e) = locks.release(&key, &token).await {
                warn!(key = %key, error = %e, "Failed to release dropped seat lock");
            }
        });
    }
}
