use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_CONFIRMED: &str = "CONFIRMED";
pub const STATUS_COMPLETED: &str = "COMPLETED";
pub const STATUS_CANCELLED: &str = "CANCELLED";
pub const STATUS_WEATHER_CANCELLED: &str = "WEATHER_CANCELLED";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Reservation {
    pub id: String,
    pub user_id: String,
    pub slot_config_id: String,
    pub promo_code_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewReservationParams {
    pub user_id: String,
    pub slot_config_id: String,
    pub promo_code_id: String,
    pub start: DateTime<Utc>,
    pub total_min: i32,
}

impl Reservation {
    pub fn new(params: NewReservationParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            slot_config_id: params.slot_config_id,
            promo_code_id: params.promo_code_id,
            start_time: params.start,
            end_time: params.start + chrono::Duration::minutes(params.total_min as i64),
            status: STATUS_CONFIRMED.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// CONFIRMED and COMPLETED reservations occupy their window; cancelled
    /// ones (customer or weather) free it.
    pub fn is_blocking(&self) -> bool {
        self.status == STATUS_CONFIRMED || self.status == STATUS_COMPLETED
    }

    /// Hours charged against a promo code for this window, setup included.
    pub fn charged_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_minutes() as f64 / 60.0
    }
}
