//! Zone repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;
use ticketd_entity::Zone;

use crate::store::ZoneStore;

/// Read-only zone lookups. Zones have no writer here, so no row lock is taken.
#[derive(Debug, Clone)]
pub struct ZoneRepository {
    pool: PgPool,
}

impl ZoneRepository {
    /// Create a new zone repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneStore for ZoneRepository {
    async fn find_one(&self, id: Uuid) -> AppResult<Zone> {
        sqlx::query_as::<_, Zone>("SELECT * FROM zones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to find zone", e))?
            .ok_or_else(|| AppError::not_found(format!("Zone {id} not found")))
    }
}
