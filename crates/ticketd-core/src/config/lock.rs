//! Seat lock backend configuration.

use serde::{Deserialize, Serialize};

/// Which lock backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockProviderKind {
    /// Redis-backed lock shared by every process (default).
    Redis,
    /// Process-local lock, for single-node deployments and tests.
    Memory,
}

/// Top-level lock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Lock provider: `"redis"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: LockProviderKind,
    /// Redis-specific settings.
    #[serde(default)]
    pub redis: RedisLockConfig,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            redis: RedisLockConfig::default(),
        }
    }
}

/// Redis lock backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisLockConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for RedisLockConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

fn default_provider() -> LockProviderKind {
    LockProviderKind::Redis
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
