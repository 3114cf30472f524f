//! Post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PostId, UserId};
use crate::domain::user::UserSummary;

/// A post as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub body: String,
    pub created_at: DateTime<Utc>,

    /// `None` for top-level posts.
    pub parent_id: Option<PostId>,

    /// Displayed identity. May differ from `user` for pseudonymous posting.
    pub author: UserSummary,

    /// Account that actually posted; owner for notifications.
    pub user: UserSummary,

    pub likes_count: u64,
    pub replies_count: u64,

    /// Whether the viewer the post was loaded for has liked it.
    pub is_liked: bool,
}

impl Post {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// The account that receives notifications about this post.
    pub fn owner_id(&self) -> &UserId {
        &self.user.id
    }
}

/// A post that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub body: String,
    pub parent_id: Option<PostId>,
    pub author_id: UserId,
    pub user_id: UserId,
}

impl NewPost {
    /// A top-level post authored by the posting account itself.
    pub fn new(body: impl Into<String>, user_id: UserId) -> Self {
        Self {
            body: body.into(),
            parent_id: None,
            author_id: user_id.clone(),
            user_id,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<PostId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Overrides the displayed author. `None` keeps the posting account.
    pub fn with_author(mut self, author_id: Option<UserId>) -> Self {
        if let Some(author_id) = author_id {
            self.author_id = author_id;
        }
        self
    }
}
