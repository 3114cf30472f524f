//! Errors returned by the orchestrator.
//!
//! Three groups, all surfaced to callers as-is:
//! - validation failures, one per malformed field
//! - expected business outcomes (not found, duplicate email, ...)
//! - `InternalServerError`, which replaces every unexpected port failure

use thiserror::Error;

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum ServiceError {
    #[error("email is not valid")]
    InvalidEmail,

    #[error("password is not valid")]
    InvalidPassword,

    #[error("push token is not valid")]
    InvalidPushToken,

    #[error("id is not valid")]
    InvalidId,

    #[error("user id is not valid")]
    InvalidUserId,

    #[error("followed id is not valid")]
    InvalidFollowedId,

    #[error("name is not valid")]
    InvalidName,

    #[error("avatar is not valid")]
    InvalidAvatar,

    #[error("body is not valid")]
    InvalidBody,

    #[error("post id is not valid")]
    InvalidPostId,

    #[error("feed type is not valid")]
    InvalidFeedType,

    #[error("user not found")]
    UserNotFound,

    #[error("email already registered")]
    EmailAlreadyRegistered,

    #[error("wrong password")]
    WrongPassword,

    #[error("post not found")]
    PostNotFound,

    #[error("user not follow anyone")]
    UserNotFollowAnyone,

    #[error("registration method is disabled")]
    RegistrationDisabled,

    #[error("internal server error")]
    InternalServerError,
}

impl ServiceError {
    /// Stable machine-readable code for transports.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidEmail => "INVALID_EMAIL",
            ServiceError::InvalidPassword => "INVALID_PASSWORD",
            ServiceError::InvalidPushToken => "INVALID_PUSH_TOKEN",
            ServiceError::InvalidId => "INVALID_ID",
            ServiceError::InvalidUserId => "INVALID_USER_ID",
            ServiceError::InvalidFollowedId => "INVALID_FOLLOWED_ID",
            ServiceError::InvalidName => "INVALID_NAME",
            ServiceError::InvalidAvatar => "INVALID_AVATAR",
            ServiceError::InvalidBody => "INVALID_BODY",
            ServiceError::InvalidPostId => "INVALID_POST_ID",
            ServiceError::InvalidFeedType => "INVALID_FEED_TYPE",
            ServiceError::UserNotFound => "USER_NOT_FOUND",
            ServiceError::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            ServiceError::WrongPassword => "WRONG_PASSWORD",
            ServiceError::PostNotFound => "POST_NOT_FOUND",
            ServiceError::UserNotFollowAnyone => "USER_NOT_FOLLOW_ANYONE",
            ServiceError::RegistrationDisabled => "REGISTRATION_DISABLED",
            ServiceError::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }

    /// True for errors caused by a malformed request field.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidEmail
                | ServiceError::InvalidPassword
                | ServiceError::InvalidPushToken
                | ServiceError::InvalidId
                | ServiceError::InvalidUserId
                | ServiceError::InvalidFollowedId
                | ServiceError::InvalidName
                | ServiceError::InvalidAvatar
                | ServiceError::InvalidBody
                | ServiceError::InvalidPostId
                | ServiceError::InvalidFeedType
        )
    }

    /// Maps a field-level validation failure onto the per-field error kind.
    pub fn from_validation(err: &ValidationError) -> Self {
        let field = match err {
            ValidationError::EmptyField { field } => field,
            ValidationError::InvalidFormat { field, .. } => field,
        };
        match field.as_str() {
            "email" => ServiceError::InvalidEmail,
            "password" => ServiceError::InvalidPassword,
            "push_token" => ServiceError::InvalidPushToken,
            "user_id" => ServiceError::InvalidUserId,
            "followed_id" => ServiceError::InvalidFollowedId,
            "name" => ServiceError::InvalidName,
            "avatar" => ServiceError::InvalidAvatar,
            "body" => ServiceError::InvalidBody,
            "post_id" => ServiceError::InvalidPostId,
            "feed_type" | "type" => ServiceError::InvalidFeedType,
            _ => ServiceError::InvalidId,
        }
    }
}
