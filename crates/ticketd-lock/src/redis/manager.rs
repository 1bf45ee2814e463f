//! Token-owned seat locks in Redis.
//!
//! Each lock is one string key whose value is the owner token and whose
//! expiry is the hold TTL. Check-and-set and check-and-delete run as Lua
//! scripts so they are atomic on the server.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use ticketd_core::result::AppResult;
use ticketd_core::traits::{HealthCheck, LockError, LockLease, SeatLockManager};

use super::client::RedisClient;

/// Acquire or renew a lock.
///
/// KEYS[1] = lock key
/// ARGV[1] = owner token
/// ARGV[2] = ttl in milliseconds
///
/// Returns:
///   1 = acquired or renewed
///   0 = held by another token
const ACQUIRE_SCRIPT: &str = r#"
    local current = redis.call('GET', KEYS[1])
    if current == false or current == ARGV[1] then
        redis.call('SET', KEYS[1], ARGV[1], 'PX', ARGV[2])
        return 1
    end
    return 0
"#;

/// Release a lock owned by the caller.
///
/// KEYS[1] = lock key
/// ARGV[1] = owner token
///
/// Returns:
///   1 = released
///   0 = no lock
///  -1 = held by another token
const RELEASE_SCRIPT: &str = r#"
    local current = redis.call('GET', KEYS[1])
    if current == false then
        return 0
    end
    if current == ARGV[1] then
        redis.call('DEL', KEYS[1])
        return 1
    end
    return -1
"#;

/// Redis [`SeatLockManager`] for multi-process deployments.
#[derive(Debug, Clone)]
pub struct RedisLockManager {
    client: RedisClient,
}

impl RedisLockManager {
    /// Create a lock manager over a connected client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn backend_error(e: redis::RedisError) -> LockError {
        LockError::Backend(e.to_string())
    }
}

/// `PX` rejects zero, so sub-millisecond TTLs round up.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[async_trait]
impl SeatLockManager for RedisLockManager {
    async fn acquire(&self, key: &str, ttl: Duration, token: &str) -> Result<LockLease, LockError> {
        let mut conn = self.client.conn_mut();

        let result: i64 = redis::Script::new(ACQUIRE_SCRIPT)
            .key(key)
            .arg(token)
            .arg(ttl_millis(ttl))
            .invoke_async(&mut conn)
            .await
            .map_err(Self::backend_error)?;

        match result {
            1 => {
                debug!(key = %key, ttl_ms = ttl_millis(ttl), "Seat lock acquired via Redis");
                Ok(LockLease {
                    key: key.to_string(),
                    token: token.to_string(),
                    ttl,
                })
            }
            0 => Err(LockError::AlreadyTaken),
            other => {
                error!(key = %key, result = other, "Unexpected lock acquire result");
                Err(LockError::Backend(format!(
                    "unexpected acquire result: {other}"
                )))
            }
        }
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), LockError> {
        let mut conn = self.client.conn_mut();

        let result: i64 = redis::Script::new(RELEASE_SCRIPT)
            .key(key)
            .arg(token)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::backend_error)?;

        match result {
            1 => {
                debug!(key = %key, "Seat lock released via Redis");
                Ok(())
            }
            0 => Ok(()),
            -1 => {
                warn!(key = %key, "Seat unlock denied: held by another token");
                Err(LockError::UnlockNotPermitted)
            }
            other => {
                error!(key = %key, result = other, "Unexpected lock release result");
                Err(LockError::Backend(format!(
                    "unexpected release result: {other}"
                )))
            }
        }
    }
}

#[async_trait]
impl HealthCheck for RedisLockManager {
    fn component(&self) -> &'static str {
        "redis"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client.ping().await
    }
}
