use axum::{extract::{Query, State}, response::IntoResponse, Json};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dtos::responses::SlotsResponse;
use crate::domain::services::availability::{day_window_utc, generate_time_slots, is_date_bookable};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let policy = &state.config.booking_policy;
    let now = state.clock.now();
    let bookable = is_date_bookable(date, now, policy);

    let configs = state.slot_config_repo.list_active().await?;

    let (day_start, day_end) = day_window_utc(date, policy.timezone)
        .ok_or(AppError::Validation("Invalid date for club timezone".into()))?;
    let reservations = state.reservation_repo.list_blocking_in_range(day_start, day_end).await?;

    let slots = generate_time_slots(date, &configs, &reservations, now, policy);

    Ok(Json(SlotsResponse {
        date: date_str.clone(),
        bookable,
        slots,
    }))
}

pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;

    let start_date = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end_date = NaiveDate::parse_from_str(end_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end".into()))?;
    if end_date < start_date {
        return Err(AppError::Validation("end must not precede start".into()));
    }

    let policy = &state.config.booking_policy;
    let now = state.clock.now();
    let configs = state.slot_config_repo.list_active().await?;

    let (range_start, _) = day_window_utc(start_date, policy.timezone)
        .ok_or(AppError::Validation("Invalid start for club timezone".into()))?;
    let (_, range_end) = day_window_utc(end_date, policy.timezone)
        .ok_or(AppError::Validation("Invalid end for club timezone".into()))?;

    let all_reservations = state.reservation_repo.list_blocking_in_range(range_start, range_end).await?;

    let mut available_dates = Vec::new();
    let mut current_date = start_date;

    while current_date <= end_date {
        if is_date_bookable(current_date, now, policy)
            && let Some((day_start, day_end)) = day_window_utc(current_date, policy.timezone)
        {
            let day_reservations: Vec<_> = all_reservations.iter()
                .filter(|r| r.start_time < day_end && r.end_time > day_start)
                .cloned()
                .collect();

            let slots = generate_time_slots(current_date, &configs, &day_reservations, now, policy);
            if slots.iter().any(|s| s.is_available) {
                available_dates.push(current_date.to_string());
            }
        }
        current_date += Duration::days(1);
    }

    Ok(Json(available_dates))
}
