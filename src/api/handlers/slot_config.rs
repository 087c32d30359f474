use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateSlotConfigRequest, UpdateSlotConfigRequest};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::slot_config::SlotConfig;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_slot_configs(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let configs = state.slot_config_repo.list().await?;
    Ok(Json(configs))
}

pub async fn create_slot_config(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateSlotConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.duration_min <= 0 {
        return Err(AppError::Validation("duration_min must be positive".into()));
    }
    if payload.setup_min < 0 {
        return Err(AppError::Validation("setup_min must not be negative".into()));
    }

    let mut config = SlotConfig::new(payload.name, payload.duration_min, payload.setup_min);
    if let Some(active) = payload.is_active {
        config.is_active = active;
    }

    let created = state.slot_config_repo.create(&config).await?;
    info!("Slot config created: {} ({}+{} min)", created.id, created.duration_min, created.setup_min);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_slot_config(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSlotConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut config = state.slot_config_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Slot config not found".into()))?;

    if let Some(name) = payload.name { config.name = name; }
    if let Some(duration) = payload.duration_min {
        if duration <= 0 {
            return Err(AppError::Validation("duration_min must be positive".into()));
        }
        config.duration_min = duration;
    }
    if let Some(setup) = payload.setup_min {
        if setup < 0 {
            return Err(AppError::Validation("setup_min must not be negative".into()));
        }
        config.setup_min = setup;
    }
    if let Some(active) = payload.is_active { config.is_active = active; }

    let updated = state.slot_config_repo.update(&config).await?;
    info!("Slot config updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_slot_config(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.slot_config_repo.delete(&id).await?;
    info!("Slot config deleted: {}", id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}
