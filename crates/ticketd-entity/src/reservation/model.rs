//! Reservation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::ReservationStatus;

/// A session's claim on a seat over a time window.
///
/// Reservations are never deleted; superseded ones move to `Expired`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique reservation identifier.
    pub id: Uuid,
    /// Reserved seat.
    pub seat_id: Uuid,
    /// Session that made the reservation.
    pub session_id: String,
    /// Current status.
    pub status: ReservationStatus,
    /// When the reservation was first made.
    pub reserved_at: DateTime<Utc>,
    /// When the reservation stops being payable.
    pub expires_at: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Pending and not yet past `expires_at`.
    pub fn can_pay(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Pending && now < self.expires_at
    }

    /// Pending but past `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == ReservationStatus::Pending && now > self.expires_at
    }
}

/// Data required to create a reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    /// Reserved seat.
    pub seat_id: Uuid,
    /// Reserving session.
    pub session_id: String,
    /// Initial status.
    pub status: ReservationStatus,
    /// Reservation time.
    pub reserved_at: DateTime<Utc>,
    /// Payment deadline.
    pub expires_at: DateTime<Utc>,
}

impl NewReservation {
    /// A fresh pending reservation made at `reserved_at`, payable until `expires_at`.
    pub fn pending(
        seat_id: Uuid,
        session_id: impl Into<String>,
        reserved_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            seat_id,
            session_id: session_id.into(),
            status: ReservationStatus::Pending,
            reserved_at,
            expires_at,
        }
    }
}

/// Partial update of a reservation row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservation {
    /// Reservation to update.
    pub id: Uuid,
    /// New status.
    pub status: Option<ReservationStatus>,
    /// New payment deadline.
    pub expires_at: Option<DateTime<Utc>>,
}

impl UpdateReservation {
    /// Extend the payment deadline.
    pub fn extend(id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status: None,
            expires_at: Some(expires_at),
        }
    }

    /// Mark the reservation expired.
    pub fn expire(id: Uuid) -> Self {
        Self {
            id,
            status: Some(ReservationStatus::Expired),
            expires_at: None,
        }
    }

    /// Whether no column would change.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.expires_at.is_none()
    }

    /// Apply the update to an in-memory copy of the row.
    pub fn apply_to(&self, reservation: &mut Reservation, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            reservation.status = status;
        }
        if let Some(expires_at) = self.expires_at {
            reservation.expires_at = expires_at;
        }
        reservation.updated_at = now;
    }
}

/// Optional filters for listing reservations. All set fields must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationFilter {
    /// Match this seat.
    pub seat_id: Option<Uuid>,
    /// Match this session.
    pub session_id: Option<String>,
    /// Match this status.
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    /// Whether `reservation` satisfies every set field.
    pub fn matches(&self, reservation: &Reservation) -> bool {
        self.seat_id.is_none_or(|id| id == reservation.seat_id)
            && self
                .session_id
                .as_deref()
                .is_none_or(|sid| sid == reservation.session_id)
            && self.status.is_none_or(|s| s == reservation.status)
    }
}
