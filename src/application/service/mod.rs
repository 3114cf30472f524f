//! MenfessService - the orchestrator behind every use case.
//!
//! Each method validates its request, runs a fixed sequence of port calls
//! and classifies failures:
//! - validation and business errors go back to the caller unchanged
//! - any other port failure is recorded in the [`ErrorLog`] with the
//!   command and a call-site tag, then replaced by `InternalServerError`

mod auth;
mod post;
mod user;

#[cfg(test)]
mod test_support;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::{AuthService, ErrorLog, Notifier, PostRepository, UserRepository};

use super::ServiceError;

/// Which registration flow a deployment accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    /// Push token only; profile completed later.
    #[default]
    Anonymous,
    /// Email and password.
    Credentials,
}

/// Ports the orchestrator runs against.
#[derive(Clone)]
pub struct Adapters {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub auth: Arc<dyn AuthService>,
    pub notifier: Arc<dyn Notifier>,
    pub log: Arc<dyn ErrorLog>,
}

/// Result of login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResult {
    pub token: String,
}

/// Acknowledgement for use cases with no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResult {
    pub message: String,
}

impl MessageResult {
    pub fn success() -> Self {
        Self {
            message: "success".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetMenfessListResult {
    pub menfess_list: Vec<User>,
    pub followed_ids: Vec<UserId>,
}

/// The orchestrator. Cheap to clone; all state lives behind the ports.
#[derive(Clone)]
pub struct MenfessService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    auth: Arc<dyn AuthService>,
    notifier: Arc<dyn Notifier>,
    log: Arc<dyn ErrorLog>,
    registration_mode: RegistrationMode,
}

impl MenfessService {
    pub fn new(adapters: Adapters, registration_mode: RegistrationMode) -> Self {
        Self {
            users: adapters.users,
            posts: adapters.posts,
            auth: adapters.auth,
            notifier: adapters.notifier,
            log: adapters.log,
            registration_mode,
        }
    }

    pub fn registration_mode(&self) -> RegistrationMode {
        self.registration_mode
    }

    /// Records an unexpected failure and hides it behind `InternalServerError`.
    fn internal(&self, err: DomainError, payload: &dyn fmt::Debug, context: &str) -> ServiceError {
        self.log.record(&err, payload, context);
        ServiceError::InternalServerError
    }

    /// Passes not-found sentinels through; everything else is internal.
    fn classify(&self, err: DomainError, payload: &dyn fmt::Debug, context: &str) -> ServiceError {
        match err.code {
            ErrorCode::UserNotFound => ServiceError::UserNotFound,
            ErrorCode::PostNotFound => ServiceError::PostNotFound,
            _ => self.internal(err, payload, context),
        }
    }
}
