use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::api::handlers::{auth, availability, health, promo_code, reservation, slot_config};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public booking flow
        .route("/api/v1/availability/slots", get(availability::get_slots))
        .route("/api/v1/availability/dates", get(availability::get_available_dates))

        // Rider account
        .route("/api/v1/reservations", post(reservation::create_reservation).get(reservation::list_my_reservations))
        .route("/api/v1/reservations/{id}/cancel", post(reservation::cancel_reservation))
        .route("/api/v1/promo-codes", get(promo_code::list_my_promo_codes))

        // Admin
        .route("/api/v1/admin/reservations", get(reservation::list_all_reservations))
        .route("/api/v1/admin/reservations/{id}/weather-cancel", post(reservation::weather_cancel_reservation))
        .route("/api/v1/admin/slot-configs", get(slot_config::list_slot_configs).post(slot_config::create_slot_config))
        .route("/api/v1/admin/slot-configs/{id}", put(slot_config::update_slot_config).delete(slot_config::delete_slot_config))
        .route("/api/v1/admin/promo-codes", get(promo_code::list_all_promo_codes).post(promo_code::issue_promo_code))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
