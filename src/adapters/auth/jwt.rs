//! HS256 JWT tokens and argon2 password hashing.
//!
//! One adapter serves both auth ports: the orchestrator uses it as an
//! [`AuthService`] and the HTTP middleware as a [`TokenValidator`].

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{AuthService, TokenValidator};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

pub struct JwtAuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl JwtAuthService {
    pub fn new(secret: &SecretString, token_ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            token_ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl())
    }

    fn auth_error(message: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::AuthError, message)
    }
}

#[async_trait]
impl AuthService for JwtAuthService {
    async fn generate_token(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| Self::auth_error("token expiry is out of range"))?;
        let claims = Claims {
            sub: user.id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Self::auth_error(format!("failed to sign token: {}", e)))
    }

    async fn verify_password(&self, hash: &str, password: &str) -> Result<bool, DomainError> {
        let hash = hash.to_string();
        let password = password.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool, DomainError> {
            let parsed = PasswordHash::new(&hash)
                .map_err(|e| Self::auth_error(format!("stored hash is unparseable: {}", e)))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| DomainError::internal(format!("password task failed: {}", e)))?
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || -> Result<String, DomainError> {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| Self::auth_error(format!("failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| DomainError::internal(format!("password task failed: {}", e)))?
    }
}

#[async_trait]
impl TokenValidator for JwtAuthService {
    async fn validate(&self, token: &str) -> Result<UserId, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        UserId::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Profile, UserKind};

    fn service(secret: &str) -> JwtAuthService {
        JwtAuthService::new(&SecretString::new(secret.to_string()), Duration::days(30))
    }

    fn user(id: &str) -> User {
        User::new(UserId::new(id).unwrap(), None, Profile::default(), UserKind::Regular)
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_user() {
        let auth = service("test-secret-at-least-16");
        let token = auth.generate_token(&user("u-42")).await.unwrap();

        let user_id = auth.validate(&token).await.unwrap();
        assert_eq!(user_id.as_str(), "u-42");
    }

    #[tokio::test]
    async fn token_from_other_secret_is_rejected() {
        let token = service("first-secret-0000")
            .generate_token(&user("u1"))
            .await
            .unwrap();

        let err = service("second-secret-000").validate(&token).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let err = service("secret-secret-00")
            .validate("not.a.jwt")
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let auth = service("secret-secret-00");
        let claims = Claims {
            sub: "u1".to_string(),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &auth.encoding_key).unwrap();

        assert_eq!(auth.validate(&token).await.unwrap_err(), AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn out_of_range_expiry_is_an_error() {
        let auth = JwtAuthService::new(
            &SecretString::new("secret-secret-00".to_string()),
            Duration::weeks(52_000_000),
        );

        let err = auth.generate_token(&user("u1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);
    }

    #[tokio::test]
    async fn password_hash_round_trip() {
        let auth = service("secret-secret-00");
        let hash = auth.hash_password("password").await.unwrap();

        assert_ne!(hash, "password");
        assert!(auth.verify_password(&hash, "password").await.unwrap());
        assert!(!auth.verify_password(&hash, "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let auth = service("secret-secret-00");
        let a = auth.hash_password("password").await.unwrap();
        let b = auth.hash_password("password").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn unparseable_hash_is_an_error_not_a_mismatch() {
        let auth = service("secret-secret-00");
        let err = auth.verify_password("plaintext", "password").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);
    }
}
