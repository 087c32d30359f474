use crate::domain::models::slot::TimeSlot;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    /// Date-level advance-notice check; slots can still be empty on a
    /// bookable date when every window is taken.
    pub bookable: bool,
    pub slots: Vec<TimeSlot>,
}
