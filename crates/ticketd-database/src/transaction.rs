//! sqlx-backed [`Transaction`] and [`TransactionFactory`].

use async_trait::async_trait;
use sqlx::{PgPool, Postgres};

use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;

use crate::store::{ReservationStore, SeatStore, Transaction, TransactionFactory};

/// A PostgreSQL transaction. Implements the seat and reservation stores
/// directly so both share the same connection.
pub struct PgTransaction {
    pub(crate) tx: sqlx::Transaction<'static, Postgres>,
}

impl std::fmt::Debug for PgTransaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTransaction").finish_non_exhaustive()
    }
}

impl PgTransaction {
    /// Begin a transaction on `pool`.
    pub async fn begin(pool: &PgPool) -> AppResult<Self> {
        let tx = pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to begin transaction", e)
        })?;
        Ok(Self { tx })
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    fn seats(&mut self) -> &mut dyn SeatStore {
        self
    }

    fn reservations(&mut self) -> &mut dyn ReservationStore {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to commit transaction", e)
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(ErrorKind::Internal, "Failed to roll back transaction", e)
        })
    }
}

/// Opens [`PgTransaction`]s from a pool.
#[derive(Debug, Clone)]
pub struct PgTransactionFactory {
    pool: PgPool,
}

impl PgTransactionFactory {
    /// Create a factory over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionFactory for PgTransactionFactory {
    async fn begin(&self) -> AppResult<Box<dyn Transaction>> {
        Ok(Box::new(PgTransaction::begin(&self.pool).await?))
    }
}
