use wakesurf_backend::{
    api::router::create_router,
    config::{BookingPolicy, Config},
    domain::ports::{Clock, EmailService},
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_promo_code_repo::SqlitePromoCodeRepo,
        sqlite_reservation_repo::SqliteReservationRepo,
        sqlite_slot_config_repo::SqliteSlotConfigRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// Frozen "now" for every test app: a Sunday morning in June, so the
/// following days are comfortably within the advance-notice window.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap()
}

/// Frozen clock so availability assertions are deterministic.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Clone, Default)]
pub struct MockEmailService {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
    pub user_id: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub mailer: MockEmailService,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_now(fixed_now()).await
    }

    pub async fn with_now(now: DateTime<Utc>) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "integration-test-secret".to_string(),
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            booking_policy: BookingPolicy::default(),
        };

        let mailer = MockEmailService::default();
        let auth_service = Arc::new(AuthService::new(&config));

        let state = Arc::new(AppState {
            config,
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            slot_config_repo: Arc::new(SqliteSlotConfigRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            promo_code_repo: Arc::new(SqlitePromoCodeRepo::new(pool.clone())),
            auth_service,
            email_service: Arc::new(mailer.clone()),
            clock: Arc::new(FixedClock(now)),
            templates: Arc::new(load_templates()),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            mailer,
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "name": name,
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }

        Self::extract_auth(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": email,
            "password": password
        });

        let response = self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await.unwrap();

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        Self::extract_auth(response).await
    }

    /// Registers an account, flips its role in the database and logs in
    /// again so the new token carries the admin role.
    pub async fn admin(&self, email: &str) -> AuthHeaders {
        self.register("Admin", email, "admin-password").await;

        sqlx::query("UPDATE users SET role = 'ADMIN' WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .expect("Failed to promote test admin");

        self.login(email, "admin-password").await
    }

    async fn extract_auth(response: axum::response::Response) -> AuthHeaders {
        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start + end].to_string();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();
        let user_id = body_json["user"]["id"].as_str().expect("No user id in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token,
            user_id,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
