use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use super::send_mail;
use crate::api::dtos::requests::IssuePromoCodeRequest;
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::promo_code::PromoCode;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_my_promo_codes(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let codes = state.promo_code_repo.list_by_user(&claims.sub).await?;
    Ok(Json(codes))
}

pub async fn list_all_promo_codes(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let codes = state.promo_code_repo.list().await?;
    Ok(Json(codes))
}

/// Issues a prepaid hour bundle to a rider, typically after a package
/// purchase was confirmed out of band, and mails them the code.
pub async fn issue_promo_code(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<IssuePromoCodeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.hours <= 0.0 {
        return Err(AppError::Validation("hours must be positive".into()));
    }

    let user = state.user_repo.find_by_id(&payload.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let promo = PromoCode::new(user.id.clone(), payload.hours);
    let created = state.promo_code_repo.create(&promo).await?;
    info!("Promo code issued: {} ({}h) for user {}", created.code, created.hours, user.id);

    let mut ctx = tera::Context::new();
    ctx.insert("name", &user.name);
    ctx.insert("code", &created.code);
    ctx.insert("hours", &created.hours);
    send_mail(&state, &user.email, "Votre code promo - Wakesurf Léman", "promo_code.html", &ctx).await;

    Ok((StatusCode::CREATED, Json(created)))
}
