//! Post reads, feed, post creation and like requests.

use crate::domain::foundation::{Cursor, PageRequest, PostId, UserId};
use crate::domain::post::FeedType;

use super::{optional_post_id, optional_user_id, post_id, user_id, Validate};
use crate::application::ServiceError;

#[derive(Debug, Clone, Default)]
pub struct GetPostRequest {
    pub id: String,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct GetPostCommand {
    pub id: PostId,
    pub user_id: UserId,
}

impl Validate for GetPostRequest {
    type Command = GetPostCommand;

    fn validate(self) -> Result<GetPostCommand, ServiceError> {
        Ok(GetPostCommand {
            id: post_id(self.id, ServiceError::InvalidPostId)?,
            user_id: user_id(self.user_id, ServiceError::InvalidUserId)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetPostListRequest {
    /// Empty for top-level posts.
    pub parent_id: String,
    /// Empty for no author filter.
    pub author_ids: Vec<String>,
    pub user_id: String,
    pub first: i64,
    pub after: String,
}

#[derive(Debug, Clone)]
pub struct GetPostListCommand {
    pub parent_id: Option<PostId>,
    pub author_ids: Option<Vec<UserId>>,
    pub user_id: UserId,
    pub page: PageRequest,
}

impl Validate for GetPostListRequest {
    type Command = GetPostListCommand;

    fn validate(self) -> Result<GetPostListCommand, ServiceError> {
        let user_id = user_id(self.user_id, ServiceError::InvalidUserId)?;
        let author_ids: Vec<UserId> = self
            .author_ids
            .into_iter()
            .filter_map(optional_user_id)
            .collect();
        Ok(GetPostListCommand {
            parent_id: optional_post_id(self.parent_id),
            author_ids: (!author_ids.is_empty()).then_some(author_ids),
            user_id,
            page: page(self.first, self.after),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedRequest {
    pub user_id: String,
    /// `"all"` or `"follow"`.
    pub feed_type: String,
    pub first: i64,
    pub after: String,
}

#[derive(Debug, Clone)]
pub struct FeedCommand {
    pub user_id: UserId,
    pub feed_type: FeedType,
    pub page: PageRequest,
}

impl Validate for FeedRequest {
    type Command = FeedCommand;

    fn validate(self) -> Result<FeedCommand, ServiceError> {
        let user_id = user_id(self.user_id, ServiceError::InvalidUserId)?;
        let feed_type = self
            .feed_type
            .parse::<FeedType>()
            .map_err(|_| ServiceError::InvalidFeedType)?;
        Ok(FeedCommand {
            user_id,
            feed_type,
            page: page(self.first, self.after),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostRequest {
    pub body: String,
    pub user_id: String,
    /// Displayed author; empty posts as `user_id`.
    pub author_id: String,
    /// Empty for a top-level post.
    pub parent_id: String,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub body: String,
    pub user_id: UserId,
    pub author_id: Option<UserId>,
    pub parent_id: Option<PostId>,
}

impl Validate for CreatePostRequest {
    type Command = CreatePostCommand;

    fn validate(self) -> Result<CreatePostCommand, ServiceError> {
        if self.body.trim().is_empty() {
            return Err(ServiceError::InvalidBody);
        }
        Ok(CreatePostCommand {
            user_id: user_id(self.user_id, ServiceError::InvalidUserId)?,
            body: self.body,
            author_id: optional_user_id(self.author_id),
            parent_id: optional_post_id(self.parent_id),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LikePostRequest {
    pub post_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct LikePostCommand {
    pub post_id: PostId,
    pub user_id: UserId,
}

impl Validate for LikePostRequest {
    type Command = LikePostCommand;

    fn validate(self) -> Result<LikePostCommand, ServiceError> {
        Ok(LikePostCommand {
            post_id: post_id(self.post_id, ServiceError::InvalidPostId)?,
            user_id: user_id(self.user_id, ServiceError::InvalidUserId)?,
        })
    }
}

fn page(first: i64, after: String) -> PageRequest {
    let mut page = PageRequest::new(first, Cursor::new(after));
    page.normalize();
    page
}
