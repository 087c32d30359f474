use crate::config::Config;
use crate::domain::ports::{
    Clock, EmailService, PromoCodeRepository, ReservationRepository, SlotConfigRepository,
    UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub slot_config_repo: Arc<dyn SlotConfigRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
    pub promo_code_repo: Arc<dyn PromoCodeRepository>,
    pub auth_service: Arc<AuthService>,
    pub email_service: Arc<dyn EmailService>,
    pub clock: Arc<dyn Clock>,
    pub templates: Arc<Tera>,
}
