//! [`Notifier`] backed by a push-token store and the background dispatcher.

use async_trait::async_trait;
use std::sync::Arc;

use super::dispatcher::NotificationDispatcher;
use crate::domain::foundation::{DomainError, PostId, UserId};
use crate::domain::post::Post;
use crate::domain::user::User;
use crate::ports::{Notifier, PushData, PushMessage, PushTokenStore};

/// Upper bound on recipients per push request.
pub const MAX_RECIPIENTS: usize = 100;

const NEW_POST_TITLE: &str = "Someone post a menfess just now";

pub struct PushNotifier {
    tokens: Arc<dyn PushTokenStore>,
    dispatcher: Option<NotificationDispatcher>,
}

impl PushNotifier {
    pub fn new(tokens: Arc<dyn PushTokenStore>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            tokens,
            dispatcher: Some(dispatcher),
        }
    }

    /// Keeps the token registry but never sends anything.
    pub fn disabled(tokens: Arc<dyn PushTokenStore>) -> Self {
        Self {
            tokens,
            dispatcher: None,
        }
    }

    fn submit(
        &self,
        to: Vec<String>,
        title: String,
        body: &str,
        post_id: &PostId,
    ) -> Result<(), DomainError> {
        if to.is_empty() {
            return Ok(());
        }
        let Some(dispatcher) = &self.dispatcher else {
            tracing::debug!(title = %title, "Push delivery disabled, dropping notification");
            return Ok(());
        };

        for chunk in to.chunks(MAX_RECIPIENTS) {
            dispatcher.submit(PushMessage {
                to: chunk.to_vec(),
                title: title.clone(),
                body: body.to_string(),
                data: PushData {
                    post_id: post_id.clone(),
                },
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for PushNotifier {
    async fn add_push_token(&self, user_id: &UserId, token: &str) -> Result<(), DomainError> {
        self.tokens.add(user_id, token).await
    }

    async fn remove_push_token(&self, user_id: &UserId, token: &str) -> Result<(), DomainError> {
        self.tokens.remove(user_id, token).await
    }

    async fn send_like_notification(&self, liker: &User, post: &Post) -> Result<(), DomainError> {
        let to = self.tokens.tokens_for(post.owner_id()).await?;
        self.submit(
            to,
            format!("{} like your post", liker.profile.name),
            &post.body,
            &post.id,
        )
    }

    async fn send_comment_notification(
        &self,
        comment: &Post,
        parent: &Post,
    ) -> Result<(), DomainError> {
        let to = self.tokens.tokens_for(parent.owner_id()).await?;
        self.submit(
            to,
            format!("{} comment on your post", comment.author.name),
            &comment.body,
            &parent.id,
        )
    }

    async fn broadcast_new_post_notification(&self, post: &Post) -> Result<(), DomainError> {
        let to = self.tokens.all_except(post.owner_id()).await?;
        self.submit(to, NEW_POST_TITLE.to_string(), &post.body, &post.id)
    }
}
