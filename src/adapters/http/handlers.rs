//! HTTP handlers for the menfess API.
//!
//! Each handler turns the wire input into an application request, calls the
//! orchestrator, and wraps the outcome in the response envelope.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::adapters::http::middleware::RequireAuth;
use crate::application::requests::{
    FollowUserRequest, GetMenfessListRequest, GetPostRequest, GetUserRequest, LikePostRequest,
};
use crate::application::{MenfessService, ServiceError};

use super::dto::{
    ApiResponse, CreatePostBody, CredentialRegisterBody, FeedParams, LoginBody, LogoutBody,
    PostListParams, RegisterBody, UpdateProfileBody,
};

// ════════════════════════════════════════════════════════════════════════════
// Response helpers
// ════════════════════════════════════════════════════════════════════════════

/// HTTP status for an orchestrator error.
pub fn status_for(err: &ServiceError) -> StatusCode {
    if err.is_validation() {
        return StatusCode::BAD_REQUEST;
    }
    match err {
        ServiceError::WrongPassword => StatusCode::UNAUTHORIZED,
        ServiceError::UserNotFound | ServiceError::PostNotFound => StatusCode::NOT_FOUND,
        ServiceError::EmailAlreadyRegistered => StatusCode::CONFLICT,
        ServiceError::UserNotFollowAnyone => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::RegistrationDisabled => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: ServiceError) -> Response {
    (status_for(&err), Json(ApiResponse::from(err))).into_response()
}

fn respond<T: Serialize>(result: Result<T, ServiceError>, status: StatusCode) -> Response {
    match result {
        Ok(data) => (status, Json(ApiResponse::ok(data))).into_response(),
        Err(e) => error_response(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Auth
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/login
pub async fn login(State(service): State<MenfessService>, Json(body): Json<LoginBody>) -> Response {
    respond(service.login(body.into()).await, StatusCode::OK)
}

/// POST /api/auth/register
pub async fn register(
    State(service): State<MenfessService>,
    Json(body): Json<RegisterBody>,
) -> Response {
    respond(service.register(body.into()).await, StatusCode::CREATED)
}

/// POST /api/auth/register/credentials
pub async fn register_with_credentials(
    State(service): State<MenfessService>,
    Json(body): Json<CredentialRegisterBody>,
) -> Response {
    respond(
        service.register_with_credentials(body.into()).await,
        StatusCode::CREATED,
    )
}

/// POST /api/auth/logout
pub async fn logout(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Json(body): Json<LogoutBody>,
) -> Response {
    respond(
        service.logout(body.into_request(&user_id)).await,
        StatusCode::OK,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

/// PUT /api/profile
pub async fn update_profile(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Json(body): Json<UpdateProfileBody>,
) -> Response {
    respond(
        service.update_profile(body.into_request(&user_id)).await,
        StatusCode::OK,
    )
}

/// GET /api/users/:id
pub async fn get_user(State(service): State<MenfessService>, Path(id): Path<String>) -> Response {
    respond(service.get_user(GetUserRequest { id }).await, StatusCode::OK)
}

/// POST /api/users/:id/follow - toggles following
pub async fn follow_user(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Path(followed_id): Path<String>,
) -> Response {
    let request = FollowUserRequest {
        user_id: user_id.to_string(),
        followed_id,
    };
    respond(service.follow_user(request).await, StatusCode::OK)
}

/// GET /api/menfess
pub async fn get_menfess_list(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
) -> Response {
    let request = GetMenfessListRequest {
        user_id: user_id.to_string(),
    };
    respond(service.get_menfess_list(request).await, StatusCode::OK)
}

// ════════════════════════════════════════════════════════════════════════════
// Posts
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/feed
pub async fn feed(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Query(params): Query<FeedParams>,
) -> Response {
    respond(
        service.feed(params.into_request(&user_id)).await,
        StatusCode::OK,
    )
}

/// GET /api/posts
pub async fn list_posts(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Query(params): Query<PostListParams>,
) -> Response {
    respond(
        service.get_post_list(params.into_request(&user_id)).await,
        StatusCode::OK,
    )
}

/// GET /api/posts/:id
pub async fn get_post(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let request = GetPostRequest {
        id,
        user_id: user_id.to_string(),
    };
    respond(service.get_post(request).await, StatusCode::OK)
}

/// POST /api/posts
pub async fn create_post(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Json(body): Json<CreatePostBody>,
) -> Response {
    respond(
        service.create_post(body.into_request(&user_id)).await,
        StatusCode::CREATED,
    )
}

/// POST /api/posts/:id/like - toggles the like
pub async fn like_post(
    State(service): State<MenfessService>,
    RequireAuth(user_id): RequireAuth,
    Path(post_id): Path<String>,
) -> Response {
    let request = LikePostRequest {
        post_id,
        user_id: user_id.to_string(),
    };
    respond(service.like_post(request).await, StatusCode::OK)
}

/// GET /health
pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::ok(serde_json::json!({ "status": "ok" }))),
    )
        .into_response()
}
