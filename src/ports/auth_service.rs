//! Auth ports: credential handling and bearer-token validation.
//!
//! # When to Use
//!
//! - **AuthService**: used by the orchestrator to hash/verify passwords and
//!   issue tokens after login or registration
//! - **TokenValidator**: used by the transport to turn an incoming bearer
//!   token into the caller's `UserId`

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, DomainError, UserId};
use crate::domain::user::User;

/// Password hashing and token issuance.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Issue an auth token bound to the user's ID.
    async fn generate_token(&self, user: &User) -> Result<String, DomainError>;

    /// Compare a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only when the comparison
    /// itself cannot be performed (e.g. the stored hash is unparseable).
    async fn verify_password(&self, hash: &str, password: &str) -> Result<bool, DomainError>;

    /// Produce a salted hash of a plaintext password.
    async fn hash_password(&self, password: &str) -> Result<String, DomainError>;
}

/// Validates bearer tokens issued by [`AuthService::generate_token`].
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Returns the user the token was issued for.
    ///
    /// # Errors
    ///
    /// - `AuthError::TokenExpired` if the token is past its expiry
    /// - `AuthError::InvalidToken` for any other validation failure
    async fn validate(&self, token: &str) -> Result<UserId, AuthError>;
}
