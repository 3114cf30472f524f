//! Notification port consumed by the orchestrator.
//!
//! Covers device push-token registration and the three notification kinds.
//! Sending is best-effort: the orchestrator logs send failures and carries
//! on, so implementations should return quickly and deliver in the
//! background.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::post::Post;
use crate::domain::user::User;

/// Push-token registry and notification sender.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Register a device token for a user. Additive; existing tokens stay.
    async fn add_push_token(&self, user_id: &UserId, token: &str) -> Result<(), DomainError>;

    /// Remove a device token.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user has no registered tokens at all
    async fn remove_push_token(&self, user_id: &UserId, token: &str) -> Result<(), DomainError>;

    /// Tell the post's owner that `liker` liked it.
    async fn send_like_notification(&self, liker: &User, post: &Post) -> Result<(), DomainError>;

    /// Tell the parent's owner about a new reply.
    async fn send_comment_notification(&self, comment: &Post, parent: &Post)
        -> Result<(), DomainError>;

    /// Tell every other registered device about a new top-level post.
    async fn broadcast_new_post_notification(&self, post: &Post) -> Result<(), DomainError>;
}
