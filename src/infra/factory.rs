use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tera::Tera;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::auth_service::AuthService;
use crate::infra::clock::SystemClock;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_promo_code_repo::PostgresPromoCodeRepo, postgres_reservation_repo::PostgresReservationRepo,
    postgres_slot_config_repo::PostgresSlotConfigRepo, postgres_user_repo::PostgresUserRepo,
    sqlite_promo_code_repo::SqlitePromoCodeRepo, sqlite_reservation_repo::SqliteReservationRepo,
    sqlite_slot_config_repo::SqliteSlotConfigRepo, sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("confirmation.html", include_str!("../templates/confirmation.html"))
        .expect("Failed to load confirmation template");
    tera.add_raw_template("cancellation.html", include_str!("../templates/cancellation.html"))
        .expect("Failed to load cancellation template");
    tera.add_raw_template("promo_code.html", include_str!("../templates/promo_code.html"))
        .expect("Failed to load promo code template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(config));
    let templates = Arc::new(load_templates());

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            slot_config_repo: Arc::new(PostgresSlotConfigRepo::new(pool.clone())),
            reservation_repo: Arc::new(PostgresReservationRepo::new(pool.clone())),
            promo_code_repo: Arc::new(PostgresPromoCodeRepo::new(pool.clone())),
            auth_service,
            email_service,
            clock: Arc::new(SystemClock),
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            slot_config_repo: Arc::new(SqliteSlotConfigRepo::new(pool.clone())),
            reservation_repo: Arc::new(SqliteReservationRepo::new(pool.clone())),
            promo_code_repo: Arc::new(SqlitePromoCodeRepo::new(pool.clone())),
            auth_service,
            email_service,
            clock: Arc::new(SystemClock),
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
