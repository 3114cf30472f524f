//! Post repository port.
//!
//! Posts are read per viewer: the like flag is scoped to the requesting
//! user, and like/reply counts are derived at read time.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageRequest, PostId, UserId};
use crate::domain::post::{NewPost, Post};

/// Repository port for posts and likes.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by ID as seen by `viewer`.
    ///
    /// With no viewer the like flag is always false.
    ///
    /// # Errors
    ///
    /// - `PostNotFound` if no such post exists
    /// - `DatabaseError` on persistence failure
    async fn find_by_id(&self, id: &PostId, viewer: Option<&UserId>) -> Result<Post, DomainError>;

    /// List posts newest-first, filtered and paginated per `query`.
    async fn find_list(&self, query: &PostQuery) -> Result<Page<Post>, DomainError>;

    /// Insert a new post, returning the assigned ID.
    ///
    /// IDs must sort lexically in creation order.
    async fn insert(&self, post: NewPost) -> Result<PostId, DomainError>;

    /// Add `user_id` to the post's like set. No-op if already present.
    async fn like(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError>;

    /// Remove `user_id` from the post's like set. No-op if absent.
    async fn unlike(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError>;
}

/// Filter for [`PostRepository::find_list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    /// Posts replying to this post; `None` selects top-level posts.
    pub parent_id: Option<PostId>,

    /// Restrict to these authors; `None` means no author filter.
    pub author_ids: Option<Vec<UserId>>,

    /// Viewer the like flag is computed for.
    pub viewer: UserId,

    pub page: PageRequest,
}

impl PostQuery {
    /// Top-level posts with no author filter.
    pub fn top_level(viewer: UserId, page: PageRequest) -> Self {
        Self {
            parent_id: None,
            author_ids: None,
            viewer,
            page,
        }
    }

    pub fn with_parent(mut self, parent_id: Option<PostId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn with_authors(mut self, author_ids: Option<Vec<UserId>>) -> Self {
        self.author_ids = author_ids;
        self
    }
}
