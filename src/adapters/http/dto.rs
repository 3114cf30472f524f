//! Wire types for the REST API.
//!
//! Request bodies and query strings carry only what the client controls;
//! the caller's user ID always comes from the bearer token.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::application::requests::{
    CreatePostRequest, CredentialRegisterRequest, FeedRequest, GetPostListRequest, LoginRequest,
    LogoutRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::application::ServiceError;
use crate::domain::foundation::UserId;

// ════════════════════════════════════════════════════════════════════════════
// Envelope
// ════════════════════════════════════════════════════════════════════════════

/// Every response body: `{ success, data, error }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

impl From<ServiceError> for ApiResponse<()> {
    fn from(err: ServiceError) -> Self {
        Self::failure(err.code(), err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
    #[serde(default)]
    pub push_token: String,
}

impl From<LoginBody> for LoginRequest {
    fn from(body: LoginBody) -> Self {
        LoginRequest {
            email: body.email,
            password: body.password,
            push_token: body.push_token,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub push_token: String,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        RegisterRequest {
            push_token: body.push_token,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialRegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
    #[serde(default)]
    pub push_token: String,
}

impl From<CredentialRegisterBody> for CredentialRegisterRequest {
    fn from(body: CredentialRegisterBody) -> Self {
        CredentialRegisterRequest {
            email: body.email,
            password: body.password,
            push_token: body.push_token,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutBody {
    #[serde(default)]
    pub push_token: String,
}

impl LogoutBody {
    pub fn into_request(self, user_id: &UserId) -> LogoutRequest {
        LogoutRequest {
            user_id: user_id.to_string(),
            push_token: self.push_token,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

impl UpdateProfileBody {
    pub fn into_request(self, user_id: &UserId) -> UpdateProfileRequest {
        UpdateProfileRequest {
            user_id: user_id.to_string(),
            name: self.name,
            avatar: self.avatar,
            bio: self.bio,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Posts
// ════════════════════════════════════════════════════════════════════════════

/// `GET /api/feed?type=&first=&after=`
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    #[serde(default, rename = "type")]
    pub feed_type: String,
    #[serde(default)]
    pub first: i64,
    #[serde(default)]
    pub after: String,
}

impl FeedParams {
    pub fn into_request(self, user_id: &UserId) -> FeedRequest {
        FeedRequest {
            user_id: user_id.to_string(),
            feed_type: self.feed_type,
            first: self.first,
            after: self.after,
        }
    }
}

/// `GET /api/posts?parent_id=&author_ids=&first=&after=`
///
/// `author_ids` is comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub author_ids: String,
    #[serde(default)]
    pub first: i64,
    #[serde(default)]
    pub after: String,
}

impl PostListParams {
    pub fn into_request(self, user_id: &UserId) -> GetPostListRequest {
        GetPostListRequest {
            parent_id: self.parent_id,
            author_ids: self
                .author_ids
                .split(',')
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            user_id: user_id.to_string(),
            first: self.first,
            after: self.after,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreatePostBody {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub parent_id: String,
}

impl CreatePostBody {
    pub fn into_request(self, user_id: &UserId) -> CreatePostRequest {
        CreatePostRequest {
            body: self.body,
            user_id: user_id.to_string(),
            author_id: self.author_id,
            parent_id: self.parent_id,
        }
    }
}
