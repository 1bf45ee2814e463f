//! Reservation store over an open [`PgTransaction`].

use async_trait::async_trait;

use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;
use ticketd_entity::{NewReservation, Reservation, ReservationFilter, UpdateReservation};

use crate::store::ReservationStore;
use crate::transaction::PgTransaction;

#[async_trait]
impl ReservationStore for PgTransaction {
    async fn find_all(&mut self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE ($1::uuid IS NULL OR seat_id = $1) \
               AND ($2::text IS NULL OR session_id = $2) \
               AND ($3::reservation_status IS NULL OR status = $3) \
             ORDER BY reserved_at DESC, id",
        )
        .bind(filter.seat_id)
        .bind(&filter.session_id)
        .bind(filter.status)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to list reservations", e))
    }

    async fn create(&mut self, data: &NewReservation) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (seat_id, session_id, status, reserved_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.seat_id)
        .bind(&data.session_id)
        .bind(data.status)
        .bind(data.reserved_at)
        .bind(data.expires_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to create reservation", e))
    }

    async fn update(&mut self, data: &UpdateReservation) -> AppResult<Reservation> {
        if data.is_empty() {
            return Err(AppError::invalid_argument("Reservation update has no fields"));
        }

        sqlx::query_as::<_, Reservation>(
            "UPDATE reservations SET status = COALESCE($2, status), \
                                     expires_at = COALESCE($3, expires_at), \
                                     updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(data.status)
        .bind(data.expires_at)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to update reservation", e))?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", data.id)))
    }
}
