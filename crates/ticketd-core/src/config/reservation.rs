//! Seat reservation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Reservation behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationConfig {
    /// How long a seat hold lasts, in seconds. Applies both to the
    /// distributed lock TTL and to `seats.locked_until`.
    #[serde(default = "default_seat_hold_ttl")]
    pub seat_hold_ttl_seconds: u64,
}

impl ReservationConfig {
    /// The hold duration as a [`Duration`].
    pub fn seat_hold_ttl(&self) -> Duration {
        Duration::from_secs(self.seat_hold_ttl_seconds)
    }
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            seat_hold_ttl_seconds: default_seat_hold_ttl(),
        }
    }
}

fn default_seat_hold_ttl() -> u64 {
    300
}
