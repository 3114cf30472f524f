//! Push delivery ports used by the push notification adapter.
//!
//! - `PushTokenStore` - device tokens per user
//! - `PushGateway` - the third-party push service

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, PostId, UserId};

/// Storage for device push tokens.
#[async_trait]
pub trait PushTokenStore: Send + Sync {
    /// Add a token for a user. Adding an existing token is a no-op.
    async fn add(&self, user_id: &UserId, token: &str) -> Result<(), DomainError>;

    /// Remove a token from a user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user has no token record
    async fn remove(&self, user_id: &UserId, token: &str) -> Result<(), DomainError>;

    /// Tokens registered for a user. Empty when none are.
    async fn tokens_for(&self, user_id: &UserId) -> Result<Vec<String>, DomainError>;

    /// Every registered token except those belonging to `user_id`.
    async fn all_except(&self, user_id: &UserId) -> Result<Vec<String>, DomainError>;

    /// Remove the given tokens from whichever users hold them.
    async fn remove_tokens(&self, tokens: &[String]) -> Result<(), DomainError>;
}

/// Payload attached to every notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushData {
    #[serde(rename = "postID")]
    pub post_id: PostId,
}

/// One notification addressed to a batch of device tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: Vec<String>,
    pub title: String,
    pub body: String,
    pub data: PushData,
}

/// Delivery outcome for one token, in the same order as `PushMessage::to`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushTicket {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PushTicket {
    pub const DEVICE_NOT_REGISTERED: &'static str = "DeviceNotRegistered";

    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    /// The device uninstalled the app or revoked permission; drop the token.
    pub fn is_device_not_registered(&self) -> bool {
        self.error.as_deref() == Some(Self::DEVICE_NOT_REGISTERED)
    }
}

/// Third-party push service.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Send a message, returning one ticket per addressed token.
    async fn send(&self, message: &PushMessage) -> Result<Vec<PushTicket>, DomainError>;
}
