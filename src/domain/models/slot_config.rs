use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An administrator-defined session duration plus the setup buffer that is
/// blocked on the water before the next rider can start.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SlotConfig {
    pub id: String,
    pub name: String,
    pub duration_min: i32,
    pub setup_min: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl SlotConfig {
    pub fn new(name: String, duration_min: i32, setup_min: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            duration_min,
            setup_min,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Total minutes a booking of this config occupies, setup included.
    pub fn total_min(&self) -> i32 {
        self.duration_min + self.setup_min
    }
}
