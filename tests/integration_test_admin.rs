mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed_json(method: &str, uri: &str, auth: &AuthHeaders, body: Value) -> Request<Body> {
    Request::builder().method(method).uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .header("X-CSRF-Token", auth.csrf_token.as_str())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_slot_config_crud_lifecycle() {
    let app = TestApp::new().await;
    let admin = app.admin("admin@example.com").await;

    let response = app.router.clone().oneshot(authed_json(
        "POST", "/api/v1/admin/slot-configs", &admin,
        json!({"name": "Session 2h", "duration_min": 120, "setup_min": 30}),
    )).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = parse_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["is_active"], true);

    let response = app.router.clone().oneshot(authed_json(
        "PUT", &format!("/api/v1/admin/slot-configs/{}", id), &admin,
        json!({"name": "Session 2h (révisée)", "setup_min": 15}),
    )).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = parse_body(response).await;
    assert_eq!(updated["name"], "Session 2h (révisée)");
    assert_eq!(updated["setup_min"], 15);
    assert_eq!(updated["duration_min"], 120);

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/slot-configs")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(response).await.as_array().unwrap().len(), 1);

    let response = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/v1/admin/slot-configs/{}", id))
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .header("X-CSRF-Token", admin.csrf_token.as_str())
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/slot-configs")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert!(parse_body(response).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_slot_config_validation() {
    let app = TestApp::new().await;
    let admin = app.admin("admin@example.com").await;

    for payload in [
        json!({"name": "Zero", "duration_min": 0, "setup_min": 0}),
        json!({"name": "Negative setup", "duration_min": 60, "setup_min": -5}),
    ] {
        let response = app.router.clone().oneshot(authed_json(
            "POST", "/api/v1/admin/slot-configs", &admin, payload,
        )).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_update_missing_config_is_not_found() {
    let app = TestApp::new().await;
    let admin = app.admin("admin@example.com").await;

    let response = app.router.clone().oneshot(authed_json(
        "PUT", "/api/v1/admin/slot-configs/no-such-id", &admin,
        json!({"name": "Fantôme"}),
    )).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_promo_code_issuance_and_listing() {
    let app = TestApp::new().await;
    let admin = app.admin("admin@example.com").await;
    let rider = app.register("Léa", "lea@example.com", "surf-le-lac").await;

    let response = app.router.clone().oneshot(authed_json(
        "POST", "/api/v1/admin/promo-codes", &admin,
        json!({"user_id": rider.user_id, "hours": 10.0}),
    )).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let promo = parse_body(response).await;

    let code = promo["code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(!code.contains('0') && !code.contains('O'));
    assert_eq!(promo["hours_left"], 10.0);

    // Rider sees their bundle.
    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/promo-codes")
            .header(header::COOKIE, format!("access_token={}", rider.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let mine = parse_body(response).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["code"], *code);

    // A second rider sees none.
    let other = app.register("Marc", "marc@example.com", "autre-mot-de-passe").await;
    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/promo-codes")
            .header(header::COOKIE, format!("access_token={}", other.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert!(parse_body(response).await.as_array().unwrap().is_empty());

    // Admin overview lists everything.
    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/v1/admin/promo-codes")
            .header(header::COOKIE, format!("access_token={}", admin.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(response).await.as_array().unwrap().len(), 1);

    // The code is mailed to the rider.
    let sent = app.mailer.sent.lock().unwrap().clone();
    assert!(sent.iter().any(|(to, subject)| to == "lea@example.com" && subject.contains("code promo")));
}

#[tokio::test]
async fn test_promo_code_issuance_validation() {
    let app = TestApp::new().await;
    let admin = app.admin("admin@example.com").await;
    let rider = app.register("Léa", "lea@example.com", "surf-le-lac").await;

    let response = app.router.clone().oneshot(authed_json(
        "POST", "/api/v1/admin/promo-codes", &admin,
        json!({"user_id": rider.user_id, "hours": 0.0}),
    )).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.router.clone().oneshot(authed_json(
        "POST", "/api/v1/admin/promo-codes", &admin,
        json!({"user_id": "no-such-user", "hours": 5.0}),
    )).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/health")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["status"], "ok");
}
