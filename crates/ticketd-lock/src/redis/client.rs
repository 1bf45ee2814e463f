//! Redis connection management.

use redis::Client;
use redis::aio::ConnectionManager;
use tracing::info;

use ticketd_core::config::RedisLockConfig;
use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;

/// Redis client wrapper around a reconnecting connection manager.
#[derive(Clone)]
pub struct RedisClient {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisClient").finish_non_exhaustive()
    }
}

impl RedisClient {
    /// Connect using the `[lock.redis]` configuration section.
    pub async fn connect(config: &RedisLockConfig) -> AppResult<Self> {
        Self::connect_url(&config.url).await
    }

    /// Connect to the given Redis URL.
    pub async fn connect_url(url: &str) -> AppResult<Self> {
        info!(url = %mask_redis_url(url), "Connecting to Redis");

        let client = Client::open(url).map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to connect to Redis", e)
        })?;

        info!("Connected to Redis");
        Ok(Self { conn })
    }

    /// A cloned handle to the connection manager.
    pub fn conn_mut(&self) -> ConnectionManager {
        self.conn.clone()
    }

    /// Send `PING` and expect `PONG`.
    pub async fn ping(&self) -> AppResult<bool> {
        let mut conn = self.conn_mut();
        let reply: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Redis PING failed", e))?;
        Ok(reply == "PONG")
    }
}

/// Mask the password portion of a Redis URL for logging.
fn mask_redis_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url[..at_pos].rfind(':') {
        Some(colon_pos) if colon_pos >= scheme_end => {
            format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
