//! Seat entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::SeatStatus;

/// A physical seat within a zone.
///
/// A `Pending` seat always carries `locked_until`. Once that instant has
/// passed the hold is void and the seat is claimable again, exactly as if
/// it were `Available`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seat {
    /// Unique seat identifier.
    pub id: Uuid,
    /// Owning zone.
    pub zone_id: Uuid,
    /// Human-facing seat label, e.g. `A5`.
    pub seat_number: String,
    /// Current status.
    pub status: SeatStatus,
    /// End of the current hold.
    pub locked_until: Option<DateTime<Utc>>,
    /// Session holding the seat.
    pub locked_by_session_id: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Seat {
    /// Whether the seat has been sold.
    pub fn is_booked(&self) -> bool {
        self.status == SeatStatus::Booked
    }

    /// Whether a pending hold is still in force at `now`.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.status == SeatStatus::Pending && self.locked_until.is_some_and(|until| now < until)
    }

    /// Whether the seat can be claimed at `now`.
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        match self.status {
            SeatStatus::Available => true,
            SeatStatus::Pending => self.locked_until.is_some_and(|until| now > until),
            SeatStatus::Booked => false,
        }
    }

    /// Whether `session_id` is the recorded holder.
    pub fn is_held_by(&self, session_id: &str) -> bool {
        self.locked_by_session_id.as_deref() == Some(session_id)
    }

    /// Whether a live hold belongs to someone other than `session_id`.
    pub fn is_locked_by_other(&self, session_id: &str, now: DateTime<Utc>) -> bool {
        self.is_locked(now)
            && self
                .locked_by_session_id
                .as_deref()
                .is_some_and(|holder| holder != session_id)
    }
}

/// Partial update of a seat row. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSeat {
    /// Seat to update.
    pub id: Uuid,
    /// New status.
    pub status: Option<SeatStatus>,
    /// New hold deadline.
    pub locked_until: Option<DateTime<Utc>>,
    /// New holder.
    pub locked_by_session_id: Option<String>,
}

impl UpdateSeat {
    /// Whether no column would change.
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.locked_until.is_none() && self.locked_by_session_id.is_none()
    }

    /// Apply the update to an in-memory copy of the row.
    pub fn apply_to(&self, seat: &mut Seat, now: DateTime<Utc>) {
        if let Some(status) = self.status {
            seat.status = status;
        }
        if let Some(until) = self.locked_until {
            seat.locked_until = Some(until);
        }
        if let Some(session_id) = &self.locked_by_session_id {
            seat.locked_by_session_id = Some(session_id.clone());
        }
        seat.updated_at = now;
    }
}
