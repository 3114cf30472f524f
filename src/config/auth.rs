//! Authentication configuration

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::application::RegistrationMode;

/// Shortest signing key accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 16;

/// Longest token lifetime accepted, one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Token signing and registration settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key
    pub jwt_secret: SecretString,

    /// Lifetime of issued tokens in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// Which registration flow this deployment accepts
    #[serde(default)]
    pub registration_mode: RegistrationMode,
}

impl AuthConfig {
    /// Token lifetime, clamped to `0..=MAX_TOKEN_TTL_SECS`.
    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_ttl_secs.clamp(0, MAX_TOKEN_TTL_SECS))
    }

    /// Validate authentication configuration
    ///
    /// A secret is always required; production additionally requires it to
    /// be at least [`MIN_PRODUCTION_SECRET_LEN`] bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.token_ttl_secs <= 0 || self.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::new(String::new()),
            token_ttl_secs: default_token_ttl(),
            registration_mode: RegistrationMode::default(),
        }
    }
}

fn default_token_ttl() -> i64 {
    30 * 24 * 60 * 60
}
