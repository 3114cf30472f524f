//! Inbound requests and their validation.
//!
//! Requests carry the raw strings a transport received. [`Validate`] checks
//! each field, normalizes it (trimming, lowercasing) and produces a typed
//! command the orchestrator can act on. Validation never touches a port, so
//! a malformed request fails before any I/O happens.

mod auth;
mod post;
mod user;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::{PostId, UserId};

use super::ServiceError;

pub use auth::{
    CredentialRegisterCommand, CredentialRegisterRequest, LoginCommand, LoginRequest,
    LogoutCommand, LogoutRequest, RegisterCommand, RegisterRequest,
};
pub use post::{
    CreatePostCommand, CreatePostRequest, FeedCommand, FeedRequest, GetPostCommand,
    GetPostListCommand, GetPostListRequest, GetPostRequest, LikePostCommand, LikePostRequest,
};
pub use user::{
    FollowUserCommand, FollowUserRequest, GetMenfessListCommand, GetMenfessListRequest,
    GetUserCommand, GetUserRequest, UpdateProfileCommand, UpdateProfileRequest,
};

/// Turns a raw request into its validated command.
pub trait Validate {
    type Command;

    /// # Errors
    ///
    /// The per-field validation error for the first invalid field.
    fn validate(self) -> Result<Self::Command, ServiceError>;
}

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("email pattern compiles")
});

/// Trims and lowercases an email, rejecting malformed addresses.
pub(crate) fn normalize_email(raw: &str) -> Result<String, ServiceError> {
    let email = raw.trim();
    if !EMAIL_REGEX.is_match(email) {
        return Err(ServiceError::InvalidEmail);
    }
    Ok(email.to_lowercase())
}

fn required(raw: String, err: ServiceError) -> Result<String, ServiceError> {
    if raw.is_empty() {
        return Err(err);
    }
    Ok(raw)
}

fn user_id(raw: String, err: ServiceError) -> Result<UserId, ServiceError> {
    UserId::new(raw).map_err(|_| err)
}

fn post_id(raw: String, err: ServiceError) -> Result<PostId, ServiceError> {
    PostId::new(raw).map_err(|_| err)
}

/// Empty strings mean "absent" for optional references.
fn optional_user_id(raw: String) -> Option<UserId> {
    UserId::new(raw).ok()
}

fn optional_post_id(raw: String) -> Option<PostId> {
    PostId::new(raw).ok()
}
