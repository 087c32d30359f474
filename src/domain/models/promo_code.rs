use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// No 0/O/1/I so codes survive being read over the phone.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 8;

/// A prepaid bundle of riding hours, issued after a package purchase and
/// spent (fractionally) as sessions are booked.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PromoCode {
    pub id: String,
    pub code: String,
    pub user_id: String,
    pub hours: f64,
    pub hours_left: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromoCode {
    pub fn new(user_id: String, hours: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            code: generate_code(),
            user_id,
            hours,
            hours_left: hours,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
