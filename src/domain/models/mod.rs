pub mod auth;
pub mod promo_code;
pub mod reservation;
pub mod slot;
pub mod slot_config;
pub mod user;
