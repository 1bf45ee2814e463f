//! Runtime selection of the lock backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use ticketd_core::config::{LockConfig, LockProviderKind};
#[cfg(not(feature = "redis-backend"))]
use ticketd_core::error::AppError;
use ticketd_core::result::AppResult;
use ticketd_core::traits::{HealthCheck, LockError, LockLease, SeatLockManager};

use crate::memory::MemoryLockManager;
#[cfg(feature = "redis-backend")]
use crate::redis::{RedisClient, RedisLockManager};

/// Dispatcher over the configured lock backend.
#[derive(Debug, Clone)]
pub enum LockManagerDispatch {
    /// In-process locks (single node).
    Memory(MemoryLockManager),
    /// Redis locks (multi-node).
    #[cfg(feature = "redis-backend")]
    Redis(RedisLockManager),
}

impl LockManagerDispatch {
    /// Build the backend named by `config.provider`.
    pub async fn from_config(config: &LockConfig) -> AppResult<Self> {
        match config.provider {
            LockProviderKind::Memory => {
                info!("Initializing in-memory seat lock manager");
                Ok(Self::Memory(MemoryLockManager::new()))
            }
            #[cfg(feature = "redis-backend")]
            LockProviderKind::Redis => {
                info!("Initializing Redis seat lock manager");
                let client = RedisClient::connect(&config.redis).await?;
                Ok(Self::Redis(RedisLockManager::new(client)))
            }
            #[cfg(not(feature = "redis-backend"))]
            LockProviderKind::Redis => Err(AppError::configuration(
                "lock.provider = \"redis\" requires the redis-backend feature",
            )),
        }
    }

    /// Name of the active backend.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "redis-backend")]
            Self::Redis(_) => "redis",
        }
    }
}

#[async_trait]
impl SeatLockManager for LockManagerDispatch {
    async fn acquire(&self, key: &str, ttl: Duration, token: &str) -> Result<LockLease, LockError> {
        match self {
            Self::Memory(inner) => inner.acquire(key, ttl, token).await,
            #[cfg(feature = "redis-backend")]
            Self::Redis(inner) => inner.acquire(key, ttl, token).await,
        }
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), LockError> {
        match self {
            Self::Memory(inner) => inner.release(key, token).await,
            #[cfg(feature = "redis-backend")]
            Self::Redis(inner) => inner.release(key, token).await,
        }
    }
}

#[async_trait]
impl HealthCheck for LockManagerDispatch {
    fn component(&self) -> &'static str {
        match self {
            Self::Memory(inner) => inner.component(),
            #[cfg(feature = "redis-backend")]
            Self::Redis(inner) => inner.component(),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        match self {
            Self::Memory(inner) => inner.health_check().await,
            #[cfg(feature = "redis-backend")]
            Self::Redis(inner) => inner.health_check().await,
        }
    }
}
