use crate::config::Config;
use crate::domain::models::{auth::Claims, user::User};
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};

const ACCESS_TOKEN_HOURS: i64 = 24;

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Issues an access token for the cookie plus the CSRF token the client
    /// must echo in a header on mutating requests.
    pub fn issue_token(&self, user: &User) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            exp: (now + Duration::hours(ACCESS_TOKEN_HOURS)).timestamp() as usize,
            iat: now.timestamp() as usize,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            csrf_token: csrf_token.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok((access_token, csrf_token))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookingPolicy;

    fn test_service() -> AuthService {
        let config = Config {
            database_url: "sqlite://test.db".into(),
            port: 0,
            jwt_secret: "unit-test-secret".into(),
            mail_service_url: String::new(),
            mail_service_token: String::new(),
            booking_policy: BookingPolicy::default(),
        };
        AuthService::new(&config)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let service = test_service();
        let user = User::new("Jean".into(), "jean@example.com".into(), "hash".into());

        let (token, csrf) = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, "USER");
        assert_eq!(claims.csrf_token, csrf);
        assert_eq!(csrf.len(), 32);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service();
        assert!(matches!(service.verify_token("not-a-jwt"), Err(AppError::Unauthorized)));
    }
}
