use chrono_tz::Tz;
use std::env;

/// Opening-hours and advance-notice rules for slot generation.
///
/// Defaults match the club's published conditions: sessions on the water
/// between 09:00 and 19:00, candidate starts on 30-minute boundaries,
/// bookings at least 24h ahead, and next-day bookings close at 23:00.
#[derive(Clone, Debug)]
pub struct BookingPolicy {
    pub opening_hour: u32,
    pub closing_hour: u32,
    pub granularity_min: u32,
    pub min_advance_hours: i64,
    pub cutoff_hour: u32,
    pub timezone: Tz,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            opening_hour: 9,
            closing_hour: 19,
            granularity_min: 30,
            min_advance_hours: 24,
            cutoff_hour: 23,
            timezone: chrono_tz::Europe::Zurich,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub booking_policy: BookingPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = BookingPolicy::default();

        let booking_policy = BookingPolicy {
            opening_hour: env_or("OPENING_HOUR", defaults.opening_hour),
            closing_hour: env_or("CLOSING_HOUR", defaults.closing_hour),
            granularity_min: env_or("SLOT_GRANULARITY_MIN", defaults.granularity_min),
            min_advance_hours: env_or("MIN_ADVANCE_HOURS", defaults.min_advance_hours),
            cutoff_hour: env_or("RESERVATION_CUTOFF_HOUR", defaults.cutoff_hour),
            timezone: env::var("CLUB_TIMEZONE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timezone),
        };

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            booking_policy,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
