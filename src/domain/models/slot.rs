use chrono::{DateTime, Utc};
use serde::Serialize;

/// A bookable window for one session, derived per query and never persisted.
///
/// The id encodes club-local start/end plus the generating config so the
/// frontend can key on it across reloads: `"09:00-10:30-<config_id>"`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TimeSlot {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_available: bool,
}
