//! Post reads, feed, post creation and the like toggle.

use chrono::Utc;

use super::{MenfessService, MessageResult};
use crate::application::requests::{
    CreatePostRequest, FeedRequest, GetPostListRequest, GetPostRequest, LikePostRequest, Validate,
};
use crate::application::ServiceError;
use crate::domain::foundation::Page;
use crate::domain::post::{FeedType, NewPost, Post};
use crate::domain::user::UserSummary;
use crate::ports::PostQuery;

impl MenfessService {
    pub async fn get_post(&self, req: GetPostRequest) -> Result<Post, ServiceError> {
        let cmd = req.validate()?;

        self.posts
            .find_by_id(&cmd.id, Some(&cmd.user_id))
            .await
            .map_err(|e| self.classify(e, &cmd, "[GetPost] failed get post"))
    }

    pub async fn get_post_list(&self, req: GetPostListRequest) -> Result<Page<Post>, ServiceError> {
        let cmd = req.validate()?;

        let query = PostQuery::top_level(cmd.user_id.clone(), cmd.page.clone())
            .with_parent(cmd.parent_id.clone())
            .with_authors(cmd.author_ids.clone());

        self.posts
            .find_list(&query)
            .await
            .map_err(|e| self.internal(e, &cmd, "[GetPostList] failed get post list"))
    }

    /// Top-level posts, optionally restricted to authors the caller follows.
    pub async fn feed(&self, req: FeedRequest) -> Result<Page<Post>, ServiceError> {
        let cmd = req.validate()?;

        let authors = match cmd.feed_type {
            FeedType::All => None,
            FeedType::Follow => {
                let followed = self
                    .users
                    .get_followed_ids(&cmd.user_id)
                    .await
                    .map_err(|e| self.internal(e, &cmd, "[Feed] failed get followed user"))?;
                if followed.is_empty() {
                    return Err(ServiceError::UserNotFollowAnyone);
                }
                Some(followed)
            }
        };

        let query =
            PostQuery::top_level(cmd.user_id.clone(), cmd.page.clone()).with_authors(authors);

        self.posts
            .find_list(&query)
            .await
            .map_err(|e| self.internal(e, &cmd, "[Feed] failed get post list"))
    }

    /// Persists a post or reply, then notifies.
    ///
    /// Replies notify the parent's owner; top-level posts are broadcast to
    /// every other device. Notification failures, including failing to load
    /// the parent, are logged and do not fail the call.
    pub async fn create_post(&self, req: CreatePostRequest) -> Result<MessageResult, ServiceError> {
        let cmd = req.validate()?;

        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await
            .map_err(|e| self.classify(e, &cmd, "[CreatePost] failed get user"))?;

        let new_post = NewPost::new(cmd.body.clone(), user.id.clone())
            .with_parent(cmd.parent_id.clone())
            .with_author(cmd.author_id.clone());

        let id = self
            .posts
            .insert(new_post.clone())
            .await
            .map_err(|e| self.internal(e, &cmd, "[CreatePost] failed save post"))?;

        // Notifications name the displayed author, so resolve it when posting
        // under another identity.
        let author = if new_post.author_id == user.id {
            user.summary()
        } else {
            match self.users.find_by_id(&new_post.author_id).await {
                Ok(author) => author.summary(),
                Err(e) => {
                    self.log.record(&e, &cmd, "[CreatePost] failed get author");
                    UserSummary::reference(new_post.author_id.clone())
                }
            }
        };
        let post = Post {
            id,
            body: new_post.body,
            created_at: Utc::now(),
            parent_id: new_post.parent_id,
            author,
            user: user.summary(),
            likes_count: 0,
            replies_count: 0,
            is_liked: false,
        };

        match &post.parent_id {
            Some(parent_id) => match self.posts.find_by_id(parent_id, None).await {
                Ok(parent) => {
                    if let Err(e) = self.notifier.send_comment_notification(&post, &parent).await {
                        self.log.record(&e, &cmd, "[CreatePost] failed send notification");
                    }
                }
                Err(e) => self.log.record(&e, &cmd, "[CreatePost] failed get parent post"),
            },
            None => {
                if let Err(e) = self.notifier.broadcast_new_post_notification(&post).await {
                    self.log.record(&e, &cmd, "[CreatePost] failed send notification");
                }
            }
        }

        Ok(MessageResult::success())
    }

    /// Likes the post, or unlikes it if the caller already liked it. Only
    /// the like path notifies the post's owner.
    pub async fn like_post(&self, req: LikePostRequest) -> Result<MessageResult, ServiceError> {
        let cmd = req.validate()?;

        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await
            .map_err(|e| self.classify(e, &cmd, "[LikePost] failed get user"))?;

        let post = self
            .posts
            .find_by_id(&cmd.post_id, Some(&cmd.user_id))
            .await
            .map_err(|e| self.classify(e, &cmd, "[LikePost] failed get post"))?;

        if post.is_liked {
            self.posts
                .unlike(&cmd.post_id, &cmd.user_id)
                .await
                .map_err(|e| self.internal(e, &cmd, "[LikePost] failed unlike post"))?;
        } else {
            self.posts
                .like(&cmd.post_id, &cmd.user_id)
                .await
                .map_err(|e| self.internal(e, &cmd, "[LikePost] failed like post"))?;
            if let Err(e) = self.notifier.send_like_notification(&user, &post).await {
                self.log.record(&e, &cmd, "[LikePost] failed send notification");
            }
        }

        Ok(MessageResult::success())
    }
}
