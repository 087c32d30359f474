mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_sets_cookie_and_returns_profile() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "name": "Léa Martin",
                "email": "lea@example.com",
                "password": "surf-le-lac"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response.headers().get(header::SET_COOKIE)
        .expect("register must set a cookie")
        .to_str().unwrap();
    assert!(set_cookie.contains("access_token="));
    assert!(set_cookie.contains("HttpOnly"));

    let body = parse_body(response).await;
    assert_eq!(body["user"]["email"], "lea@example.com");
    assert_eq!(body["user"]["role"], "USER");
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["csrf_token"].as_str().unwrap().len(), 32);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let app = TestApp::new().await;
    app.register("Léa", "lea@example.com", "surf-le-lac").await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "name": "Autre Léa",
                "email": "lea@example.com",
                "password": "something-else"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = TestApp::new().await;

    for payload in [
        json!({"name": "X", "email": "x@example.com", "password": "longenough"}),
        json!({"name": "Valid Name", "email": "not-an-email", "password": "longenough"}),
        json!({"name": "Valid Name", "email": "ok@example.com", "password": "short"}),
    ] {
        let response = app.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let app = TestApp::new().await;
    app.register("Léa", "lea@example.com", "surf-le-lac").await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "email": "lea@example.com",
                "password": "wrong-password"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_requires_cookie() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/reservations")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutating_request_requires_csrf_header() {
    let app = TestApp::new().await;
    let auth = app.register("Léa", "lea@example.com", "surf-le-lac").await;

    // Valid cookie but no X-CSRF-Token on a POST.
    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/reservations")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "date": "2025-06-03",
                "time": "09:00",
                "slot_config_id": "whatever",
                "promo_code": "whatever"
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let app = TestApp::new().await;
    let auth = app.register("Léa", "lea@example.com", "surf-le-lac").await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/reservations")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_promotion_grants_access() {
    let app = TestApp::new().await;
    let admin = app.admin("boss@example.com").await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/reservations")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;
    let auth = app.register("Léa", "lea@example.com", "surf-le-lac").await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/auth/logout")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers().get(header::SET_COOKIE)
        .expect("logout must clear the cookie")
        .to_str().unwrap();
    assert!(set_cookie.starts_with("access_token="));
}
