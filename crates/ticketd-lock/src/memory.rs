//! In-process seat lock manager using a Tokio mutex.
//!
//! Only coordinates callers inside one process.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use ticketd_core::result::AppResult;
use ticketd_core::traits::{HealthCheck, LockError, LockLease, SeatLockManager};

/// A held lock.
#[derive(Debug, Clone)]
struct Entry {
    token: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory [`SeatLockManager`].
///
/// Expiry is evaluated against [`tokio::time::Instant`], so tests can drive
/// it with a paused clock. Every acquire sweeps expired entries, so the map
/// only holds live locks plus those lapsed since the last acquire.
#[derive(Debug, Clone, Default)]
pub struct MemoryLockManager {
    locks: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryLockManager {
    /// Create an empty lock manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner token of `key`, if the lock is live.
    pub async fn holder(&self, key: &str) -> Option<String> {
        let locks = self.locks.lock().await;
        let now = Instant::now();
        locks
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.token.clone())
    }

    /// Number of live locks.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.locks
            .lock()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    /// Whether no live lock exists.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SeatLockManager for MemoryLockManager {
    async fn acquire(&self, key: &str, ttl: Duration, token: &str) -> Result<LockLease, LockError> {
        let mut locks = self.locks.lock().await;
        let now = Instant::now();
        locks.retain(|_, entry| entry.is_live(now));

        if let Some(entry) = locks.get(key) {
            if entry.token != token {
                debug!(key = %key, "Seat lock held by another token");
                return Err(LockError::AlreadyTaken);
            }
        }

        locks.insert(
            key.to_string(),
            Entry {
                token: token.to_string(),
                expires_at: now + ttl,
            },
        );
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Seat lock acquired");

        Ok(LockLease {
            key: key.to_string(),
            token: token.to_string(),
            ttl,
        })
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), LockError> {
        let mut locks = self.locks.lock().await;
        let now = Instant::now();

        match locks.get(key) {
            None => Ok(()),
            Some(entry) if !entry.is_live(now) => {
                locks.remove(key);
                Ok(())
            }
            Some(entry) if entry.token == token => {
                locks.remove(key);
                debug!(key = %key, "Seat lock released");
                Ok(())
            }
            Some(_) => Err(LockError::UnlockNotPermitted),
        }
    }
}

#[async_trait]
impl HealthCheck for MemoryLockManager {
    fn component(&self) -> &'static str {
        "lock"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
