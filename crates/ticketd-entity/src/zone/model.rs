//! Zone entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A seating zone. Belongs to exactly one concert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Zone {
    /// Unique zone identifier.
    pub id: Uuid,
    /// Owning concert.
    pub concert_id: Uuid,
    /// Zone name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    /// Whether this zone belongs to the given concert.
    pub fn belongs_to(&self, concert_id: Uuid) -> bool {
        self.concert_id == concert_id
    }
}
