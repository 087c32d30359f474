use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use super::send_mail;
use crate::api::dtos::requests::{CancelReservationRequest, CreateReservationRequest};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::reservation::{
    NewReservationParams, Reservation, STATUS_CANCELLED, STATUS_WEATHER_CANCELLED,
};
use crate::domain::services::availability::{day_window_utc, generate_time_slots, is_date_bookable};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;
    let time = NaiveTime::parse_from_str(&payload.time, "%H:%M")
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?;

    let policy = &state.config.booking_policy;
    let now = state.clock.now();

    if !is_date_bookable(date, now, policy) {
        return Err(AppError::Conflict("Date is not open for booking".into()));
    }

    let config = state.slot_config_repo.find_by_id(&payload.slot_config_id).await?
        .ok_or(AppError::NotFound("Slot config not found".into()))?;
    if !config.is_active {
        return Err(AppError::Validation("Slot config is not active".into()));
    }

    let promo = state.promo_code_repo.find_by_code(&payload.promo_code).await?
        .ok_or(AppError::NotFound("Promo code not found".into()))?;
    if promo.user_id != claims.sub {
        return Err(AppError::Forbidden("Promo code belongs to another account".into()));
    }
    if !promo.is_active {
        return Err(AppError::Conflict("Promo code is no longer active".into()));
    }

    let start_utc = policy.timezone
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))?
        .with_timezone(&Utc);

    let (day_start, day_end) = day_window_utc(date, policy.timezone)
        .ok_or(AppError::Validation("Invalid date for club timezone".into()))?;
    let existing = state.reservation_repo.list_blocking_in_range(day_start, day_end).await?;

    let slots = generate_time_slots(date, std::slice::from_ref(&config), &existing, now, policy);
    let slot = slots.iter().find(|s| s.start_time == start_utc)
        .ok_or_else(|| {
            warn!("Reservation rejected: {} is not a valid start for config {}", payload.time, config.id);
            AppError::Conflict("Selected time slot is not valid".into())
        })?;
    if !slot.is_available {
        return Err(AppError::Conflict("Selected time slot is already reserved".into()));
    }

    let hours = config.total_min() as f64 / 60.0;
    if promo.hours_left < hours {
        return Err(AppError::Conflict("Insufficient hours left on promo code".into()));
    }

    let reservation = Reservation::new(NewReservationParams {
        user_id: claims.sub.clone(),
        slot_config_id: config.id.clone(),
        promo_code_id: promo.id.clone(),
        start: start_utc,
        total_min: config.total_min(),
    });

    let created = state.reservation_repo.create_with_debit(&reservation, hours).await?;
    info!("Reservation confirmed: {} ({} - {})", created.id, created.start_time, created.end_time);

    let tz = policy.timezone;
    let mut ctx = tera::Context::new();
    ctx.insert("name", &claims.name);
    ctx.insert("date", &created.start_time.with_timezone(&tz).format("%d.%m.%Y").to_string());
    ctx.insert("start_time", &created.start_time.with_timezone(&tz).format("%H:%M").to_string());
    ctx.insert("end_time", &created.end_time.with_timezone(&tz).format("%H:%M").to_string());

    send_mail(&state, &claims.email, "Confirmation de réservation - Wakesurf Léman", "confirmation.html", &ctx).await;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_my_reservations(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservation_repo.list_by_user(&claims.sub).await?;
    Ok(Json(reservations))
}

pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CancelReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    if reservation.user_id != claims.sub && claims.role != "ADMIN" {
        return Err(AppError::Forbidden("Not your reservation".into()));
    }

    let hours = reservation.charged_hours();
    let cancelled = state.reservation_repo
        .cancel_with_credit(&id, STATUS_CANCELLED, hours)
        .await?;
    info!("Reservation cancelled: {} ({}h recredited)", cancelled.id, hours);

    let reason = payload.reason.unwrap_or_else(|| "Annulation par le client".to_string());
    notify_cancellation(&state, &cancelled, &reason).await;

    Ok(Json(cancelled))
}

pub async fn list_all_reservations(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let reservations = state.reservation_repo.list_all().await?;
    Ok(Json(reservations))
}

pub async fn weather_cancel_reservation(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = state.reservation_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Reservation not found".into()))?;

    let hours = reservation.charged_hours();
    let cancelled = state.reservation_repo
        .cancel_with_credit(&id, STATUS_WEATHER_CANCELLED, hours)
        .await?;
    info!("Reservation weather-cancelled: {} ({}h recredited)", cancelled.id, hours);

    notify_cancellation(&state, &cancelled, "Conditions météorologiques défavorables").await;

    Ok(Json(cancelled))
}

async fn notify_cancellation(state: &Arc<AppState>, reservation: &Reservation, reason: &str) {
    let user = match state.user_repo.find_by_id(&reservation.user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Cancellation mail skipped: user {} no longer exists", reservation.user_id);
            return;
        }
        Err(e) => {
            warn!("Cancellation mail skipped: {:?}", e);
            return;
        }
    };

    let tz = state.config.booking_policy.timezone;
    let mut ctx = tera::Context::new();
    ctx.insert("name", &user.name);
    ctx.insert("date", &reservation.start_time.with_timezone(&tz).format("%d.%m.%Y").to_string());
    ctx.insert("reason", reason);

    send_mail(state, &user.email, "Annulation de réservation - Wakesurf Léman", "cancellation.html", &ctx).await;
}
