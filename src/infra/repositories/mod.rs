pub mod sqlite_promo_code_repo;
pub mod sqlite_reservation_repo;
pub mod sqlite_slot_config_repo;
pub mod sqlite_user_repo;

pub mod postgres_promo_code_repo;
pub mod postgres_reservation_repo;
pub mod postgres_slot_config_repo;
pub mod postgres_user_repo;
