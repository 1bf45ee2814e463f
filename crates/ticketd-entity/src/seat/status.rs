//! Seat status enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use ticketd_core::error::AppError;

/// Lifecycle state of a physical seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seat_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    /// Free to be claimed.
    Available,
    /// Held by a session until `locked_until`.
    Pending,
    /// Sold. Never claimable again.
    Booked,
}

impl SeatStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Pending => "pending",
            Self::Booked => "booked",
        }
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeatStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "pending" => Ok(Self::Pending),
            "booked" => Ok(Self::Booked),
            other => Err(AppError::invalid_argument(format!(
                "invalid seat status: {other}"
            ))),
        }
    }
}
