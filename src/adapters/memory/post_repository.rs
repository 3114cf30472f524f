//! In-memory post store.
//!
//! Like and reply counts are derived on every read from the like sets and
//! the parent references, never stored. Author and user summaries are
//! resolved through the user repository at read time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::ids::{next_id, MAX_ID};
use crate::domain::foundation::{DomainError, Page, PageInfo, PostId, UserId};
use crate::domain::post::{NewPost, Post};
use crate::domain::user::UserSummary;
use crate::ports::{PostQuery, PostRepository, UserRepository};

#[derive(Debug, Clone)]
struct StoredPost {
    id: PostId,
    body: String,
    created_at: DateTime<Utc>,
    parent_id: Option<PostId>,
    author_id: UserId,
    user_id: UserId,
    likes: BTreeSet<UserId>,
}

/// Posts keyed by ID; iteration order is creation order.
pub struct InMemoryPostRepository {
    posts: RwLock<BTreeMap<PostId, StoredPost>>,
    users: Arc<dyn UserRepository>,
}

/// Counts and like flag computed for one viewer.
struct Derived {
    likes_count: u64,
    replies_count: u64,
    is_liked: bool,
}

impl InMemoryPostRepository {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            posts: RwLock::new(BTreeMap::new()),
            users,
        }
    }

    fn derive(
        posts: &BTreeMap<PostId, StoredPost>,
        post: &StoredPost,
        viewer: Option<&UserId>,
    ) -> Derived {
        Derived {
            likes_count: post.likes.len() as u64,
            replies_count: posts
                .values()
                .filter(|p| p.parent_id.as_ref() == Some(&post.id))
                .count() as u64,
            is_liked: viewer.is_some_and(|v| post.likes.contains(v)),
        }
    }

    async fn summary(&self, id: &UserId) -> UserSummary {
        match self.users.find_by_id(id).await {
            Ok(user) => user.summary(),
            Err(_) => UserSummary::reference(id.clone()),
        }
    }

    async fn materialize(&self, post: StoredPost, derived: Derived) -> Post {
        let author = self.summary(&post.author_id).await;
        let user = if post.user_id == post.author_id {
            author.clone()
        } else {
            self.summary(&post.user_id).await
        };
        Post {
            id: post.id,
            body: post.body,
            created_at: post.created_at,
            parent_id: post.parent_id,
            author,
            user,
            likes_count: derived.likes_count,
            replies_count: derived.replies_count,
            is_liked: derived.is_liked,
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &PostId, viewer: Option<&UserId>) -> Result<Post, DomainError> {
        let (post, derived) = {
            let posts = self.posts.read().await;
            let post = posts
                .get(id)
                .cloned()
                .ok_or_else(|| DomainError::post_not_found(id))?;
            let derived = Self::derive(&posts, &post, viewer);
            (post, derived)
        };
        Ok(self.materialize(post, derived).await)
    }

    async fn find_list(&self, query: &PostQuery) -> Result<Page<Post>, DomainError> {
        let limit = query.page.limit();
        let upper = if query.page.after.is_start() {
            MAX_ID
        } else {
            query.page.after.as_str()
        };

        let selected: Vec<(StoredPost, Derived)> = {
            let posts = self.posts.read().await;
            posts
                .values()
                .rev()
                .filter(|p| p.id.as_str() < upper)
                .filter(|p| p.parent_id == query.parent_id)
                .filter(|p| {
                    query
                        .author_ids
                        .as_ref()
                        .map_or(true, |authors| authors.contains(&p.author_id))
                })
                .take(limit)
                .map(|p| (p.clone(), Self::derive(&posts, p, Some(&query.viewer))))
                .collect()
        };

        let mut items = Vec::with_capacity(selected.len());
        for (post, derived) in selected {
            items.push(self.materialize(post, derived).await);
        }

        let page_info = PageInfo::from_page(items.len(), limit, items.last().map(|p| p.id.as_str()));
        Ok(Page { items, page_info })
    }

    async fn insert(&self, post: NewPost) -> Result<PostId, DomainError> {
        let id = PostId::new(next_id()).map_err(|e| DomainError::internal(e.to_string()))?;
        let stored = StoredPost {
            id: id.clone(),
            body: post.body,
            created_at: Utc::now(),
            parent_id: post.parent_id,
            author_id: post.author_id,
            user_id: post.user_id,
            likes: BTreeSet::new(),
        };
        self.posts.write().await.insert(id.clone(), stored);
        Ok(id)
    }

    async fn like(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .get_mut(post_id)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        post.likes.insert(user_id.clone());
        Ok(())
    }

    async fn unlike(&self, post_id: &PostId, user_id: &UserId) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .get_mut(post_id)
            .ok_or_else(|| DomainError::post_not_found(post_id))?;
        post.likes.remove(user_id);
        Ok(())
    }
}
