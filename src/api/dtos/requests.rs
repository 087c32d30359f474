use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateReservationRequest {
    /// Calendar day, `YYYY-MM-DD`, in club-local time.
    pub date: String,
    /// Slot start, `HH:MM`, in club-local time.
    pub time: String,
    pub slot_config_id: String,
    /// Promo code spelled out by the rider, e.g. `WXK4N2PF`.
    pub promo_code: String,
}

#[derive(Deserialize)]
pub struct CancelReservationRequest {
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSlotConfigRequest {
    pub name: String,
    pub duration_min: i32,
    pub setup_min: i32,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateSlotConfigRequest {
    pub name: Option<String>,
    pub duration_min: Option<i32>,
    pub setup_min: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct IssuePromoCodeRequest {
    pub user_id: String,
    pub hours: f64,
}
