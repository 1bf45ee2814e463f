//! Seat store over an open [`PgTransaction`].

use async_trait::async_trait;
use uuid::Uuid;

use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;
use ticketd_entity::{Seat, UpdateSeat};

use crate::store::SeatStore;
use crate::transaction::PgTransaction;

#[async_trait]
impl SeatStore for PgTransaction {
    async fn find_with_lock(&mut self, id: Uuid) -> AppResult<Seat> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to lock seat", e))?
            .ok_or_else(|| AppError::not_found(format!("Seat {id} not found")))
    }

    async fn update(&mut self, data: &UpdateSeat) -> AppResult<Seat> {
        if data.is_empty() {
            return Err(AppError::invalid_argument("Seat update has no fields"));
        }

        sqlx::query_as::<_, Seat>(
            "UPDATE seats SET status = COALESCE($2, status), \
                              locked_until = COALESCE($3, locked_until), \
                              locked_by_session_id = COALESCE($4, locked_by_session_id), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(data.status)
        .bind(data.locked_until)
        .bind(&data.locked_by_session_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to update seat", e))?
        .ok_or_else(|| AppError::not_found(format!("Seat {} not found", data.id)))
    }
}
