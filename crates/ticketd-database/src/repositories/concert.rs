//! Concert repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;
use ticketd_entity::Concert;

use crate::store::ConcertStore;

/// Read-only concert lookups.
#[derive(Debug, Clone)]
pub struct ConcertRepository {
    pool: PgPool,
}

impl ConcertRepository {
    /// Create a new concert repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConcertStore for ConcertRepository {
    async fn find_one(&self, id: Uuid) -> AppResult<Concert> {
        sqlx::query_as::<_, Concert>("SELECT * FROM concerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to find concert", e))?
            .ok_or_else(|| AppError::not_found(format!("Concert {id} not found")))
    }
}
