use crate::domain::models::{
    promo_code::PromoCode, reservation::Reservation, slot_config::SlotConfig, user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Wall-clock capability. Injected so availability rules can be tested
/// against a fixed instant instead of the ambient system time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait SlotConfigRepository: Send + Sync {
    async fn create(&self, config: &SlotConfig) -> Result<SlotConfig, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<SlotConfig>, AppError>;
    async fn list(&self) -> Result<Vec<SlotConfig>, AppError>;
    async fn list_active(&self) -> Result<Vec<SlotConfig>, AppError>;
    async fn update(&self, config: &SlotConfig) -> Result<SlotConfig, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Inserts the reservation and debits `hours` from its promo code in one
    /// transaction, re-checking the window against blocking reservations.
    /// This is where the two-users-one-slot race is resolved.
    async fn create_with_debit(&self, reservation: &Reservation, hours: f64) -> Result<Reservation, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Reservation>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Reservation>, AppError>;
    async fn list_all(&self) -> Result<Vec<Reservation>, AppError>;
    /// Blocking (CONFIRMED/COMPLETED) reservations intersecting [start, end).
    async fn list_blocking_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Reservation>, AppError>;
    /// Flips the status and credits `hours` back to the promo code in one
    /// transaction.
    async fn cancel_with_credit(&self, id: &str, status: &str, hours: f64) -> Result<Reservation, AppError>;
}

#[async_trait]
pub trait PromoCodeRepository: Send + Sync {
    async fn create(&self, promo: &PromoCode) -> Result<PromoCode, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<PromoCode>, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<PromoCode>, AppError>;
    async fn list(&self) -> Result<Vec<PromoCode>, AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}
