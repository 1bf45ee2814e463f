//! Reserve-seat orchestration.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use ticketd_core::config::ReservationConfig;
use ticketd_core::error::{AppError, ErrorKind};
use ticketd_core::result::AppResult;
use ticketd_core::traits::{Clock, SeatLockManager};
use ticketd_database::store::{ConcertStore, Transaction, TransactionFactory, ZoneStore};
use ticketd_entity::{
    NewReservation, Reservation, ReservationFilter, ReservationStatus, SeatStatus,
    UpdateReservation, UpdateSeat,
};
use ticketd_lock::seat_lock_key;

use super::guard::SeatLockGuard;
use super::request::{ReserveSeatRequest, SeatTarget};

/// Reserves seats for sessions.
///
/// The distributed lock is taken before the seat row lock, and both guard
/// the same seat. A successful call leaves the lock in place as the hold;
/// every failed call releases it.
#[derive(Clone)]
pub struct ReservationService {
    hold_ttl: Duration,
    concerts: Arc<dyn ConcertStore>,
    zones: Arc<dyn ZoneStore>,
    transactions: Arc<dyn TransactionFactory>,
    locks: Arc<dyn SeatLockManager>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService")
            .field("hold_ttl", &self.hold_ttl)
            .field("locks", &self.locks)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        config: &ReservationConfig,
        concerts: Arc<dyn ConcertStore>,
        zones: Arc<dyn ZoneStore>,
        transactions: Arc<dyn TransactionFactory>,
        locks: Arc<dyn SeatLockManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            hold_ttl: config.seat_hold_ttl(),
            concerts,
            zones,
            transactions,
            locks,
            clock,
        }
    }

    /// The configured hold duration.
    pub fn hold_ttl(&self) -> Duration {
        self.hold_ttl
    }

    /// Reserve a seat, or renew the caller's existing hold on it.
    ///
    /// Returns the pending reservation. Errors leave no database change
    /// behind and release the seat lock if it was taken.
    pub async fn reserve_seat(&self, req: &ReserveSeatRequest) -> AppResult<Reservation> {
        let target = req.parse()?;
        let now = self.clock.now();
        let hold = chrono::Duration::from_std(self.hold_ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Seat hold TTL out of range", e)
        })?;

        let concert = self.concerts.find_one(target.concert_id).await?;
        if concert.has_passed(now) {
            return Err(AppError::concert_already_passed());
        }

        let zone = self.zones.find_one(target.zone_id).await?;
        if !zone.belongs_to(target.concert_id) {
            return Err(AppError::invalid_argument(
                "the zone does not belong to the specified concert",
            ));
        }

        let key = seat_lock_key(
            &target.concert_id.to_string(),
            &target.zone_id.to_string(),
            &target.seat_id.to_string(),
        );
        let guard = SeatLockGuard::acquire(
            Arc::clone(&self.locks),
            key,
            self.hold_ttl,
            &target.session_id,
        )
        .await
        .map_err(|e| {
            debug!(
                seat_id = %target.seat_id,
                session_id = %target.session_id,
                error = %e,
                "Seat lock not acquired"
            );
            AppError::from(e)
        })?;

        match self.reserve_in_transaction(&target, now, now + hold).await {
            Ok(reservation) => {
                guard.retain();
                info!(
                    reservation_id = %reservation.id,
                    seat_id = %target.seat_id,
                    session_id = %target.session_id,
                    expires_at = %reservation.expires_at,
                    "Seat reserved"
                );
                debug!(
                    concert_id = %target.concert_id,
                    zone_id = %target.zone_id,
                    seat_id = %target.seat_id,
                    status = %SeatStatus::Pending,
                    "Seat state changed"
                );
                Ok(reservation)
            }
            Err(e) => {
                guard.release().await;
                Err(e)
            }
        }
    }

    async fn reserve_in_transaction(
        &self,
        target: &SeatTarget,
        now: DateTime<Utc>,
        locked_until: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let mut tx = self.transactions.begin().await?;

        match hold_seat(tx.as_mut(), target, now, locked_until).await {
            Ok(reservation) => {
                tx.commit().await.map_err(|e| {
                    AppError::with_source(ErrorKind::Internal, "Failed to commit reservation", e)
                })?;
                Ok(reservation)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        seat_id = %target.seat_id,
                        error = %rollback_err,
                        "Failed to roll back reservation"
                    );
                }
                Err(e)
            }
        }
    }
}

/// Row-locked seat transition and reservation bookkeeping.
async fn hold_seat(
    tx: &mut dyn Transaction,
    target: &SeatTarget,
    now: DateTime<Utc>,
    locked_until: DateTime<Utc>,
) -> AppResult<Reservation> {
    let seat = tx.seats().find_with_lock(target.seat_id).await?;
    if seat.zone_id != target.zone_id {
        return Err(AppError::invalid_argument(
            "the seat does not belong to the specified zone",
        ));
    }
    if seat.is_booked() {
        return Err(AppError::seat_already_booked());
    }
    if seat.is_locked_by_other(&target.session_id, now) {
        return Err(AppError::seat_locked());
    }

    let seat = tx
        .seats()
        .update(&UpdateSeat {
            id: seat.id,
            status: Some(SeatStatus::Pending),
            locked_until: Some(locked_until),
            locked_by_session_id: Some(target.session_id.clone()),
        })
        .await?;

    // Every pending reservation on the seat. Other sessions' ones are stale
    // now that the seat is held by this session.
    let existing = tx
        .reservations()
        .find_all(&ReservationFilter {
            seat_id: Some(seat.id),
            session_id: None,
            status: Some(ReservationStatus::Pending),
        })
        .await?;

    // Most recent first: the caller's newest payable reservation is kept,
    // everything else expires.
    let mut adopted = None;
    for reservation in existing {
        let own = reservation.session_id == target.session_id;
        if own && adopted.is_none() && reservation.can_pay(now) {
            let renewed = tx
                .reservations()
                .update(&UpdateReservation::extend(reservation.id, locked_until))
                .await?;
            info!(reservation_id = %renewed.id, "Reservation renewed");
            adopted = Some(renewed);
        } else {
            tx.reservations()
                .update(&UpdateReservation::expire(reservation.id))
                .await?;
            info!(reservation_id = %reservation.id, "Reservation expired");
        }
    }

    match adopted {
        Some(reservation) => Ok(reservation),
        None => {
            let created = tx
                .reservations()
                .create(&NewReservation::pending(
                    seat.id,
                    target.session_id.clone(),
                    now,
                    locked_until,
                ))
                .await?;
            info!(reservation_id = %created.id, seat_id = %seat.id, "Reservation created");
            Ok(created)
        }
    }
}
