//! Concert entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled concert. Zones and seats hang off it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Concert {
    /// Unique concert identifier.
    pub id: Uuid,
    /// Concert name.
    pub name: String,
    /// Venue name.
    pub venue: String,
    /// When the concert takes place.
    pub date: DateTime<Utc>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Concert {
    /// Whether the concert date is strictly before `now`.
    pub fn has_passed(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }
}
