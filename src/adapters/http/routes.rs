//! Route table and cross-cutting layers for the REST API.

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_post, feed, follow_user, get_menfess_list, get_post, get_user, health, like_post,
    list_posts, login, logout, register, register_with_credentials, update_profile,
};
use super::middleware::{auth_middleware, AuthState};
use crate::application::MenfessService;

/// Transport settings taken from the server configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
    /// Allow any origin when no explicit origins are configured.
    pub permissive_cors: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
            permissive_cors: true,
        }
    }
}

/// Routes under `/api`, with bearer-token authentication applied.
pub fn api_routes(service: MenfessService, validator: AuthState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/register/credentials", post(register_with_credentials))
        .route("/auth/logout", post(logout))
        .route("/profile", put(update_profile))
        .route("/users/:id", get(get_user))
        .route("/users/:id/follow", post(follow_user))
        .route("/menfess", get(get_menfess_list))
        .route("/feed", get(feed))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post))
        .route("/posts/:id/like", post(like_post))
        .with_state(service)
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
}

/// The full application: API, health check, tracing, CORS and timeouts.
pub fn app_router(service: MenfessService, validator: AuthState, settings: &HttpSettings) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes(service, validator))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(settings))
                .layer(TimeoutLayer::new(settings.request_timeout)),
        )
}

fn cors_layer(settings: &HttpSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && settings.permissive_cors {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
