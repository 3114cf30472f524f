//! HTTP API tests driving the full router with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use menfess::adapters::http::{app_router, HttpSettings};
use menfess::adapters::{
    InMemoryPostRepository, InMemoryPushTokenStore, InMemoryUserRepository, JwtAuthService,
    PushNotifier, TracingErrorLog,
};
use menfess::application::{Adapters, MenfessService, RegistrationMode};
use menfess::domain::user::Profile;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Api {
    router: Router,
    users: Arc<InMemoryUserRepository>,
}

impl Api {
    fn new(mode: RegistrationMode) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
        let tokens = Arc::new(InMemoryPushTokenStore::new());
        let auth = Arc::new(JwtAuthService::new(
            &SecretString::new("http-test-secret-value".to_string()),
            chrono::Duration::hours(1),
        ));

        let service = MenfessService::new(
            Adapters {
                users: users.clone(),
                posts,
                auth: auth.clone(),
                notifier: Arc::new(PushNotifier::disabled(tokens)),
                log: Arc::new(TracingErrorLog::new()),
            },
            mode,
        );

        Self {
            router: app_router(service, auth, &HttpSettings::default()),
            users,
        }
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn register(&self, push_token: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({ "push_token": push_token })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["token"].as_str().unwrap().to_string()
    }
}

fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn health_check() {
    let api = Api::new(RegistrationMode::Anonymous);
    let (status, body) = api.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let api = Api::new(RegistrationMode::Anonymous);

    let (status, body) = api.call(Method::GET, "/api/menfess", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(error_code(&body), "UNAUTHENTICATED");

    let (status, body) = api
        .call(Method::GET, "/api/menfess", Some("garbage"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "AUTH_ERROR");
}

#[tokio::test]
async fn register_post_and_read_back() {
    let api = Api::new(RegistrationMode::Anonymous);
    let token = api.register("phone-1").await;

    let (status, _) = api
        .call(
            Method::PUT,
            "/api/profile",
            Some(&token),
            Some(json!({ "name": "Alice", "avatar": "a.png", "bio": "hi" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = api
        .call(
            Method::POST,
            "/api/posts",
            Some(&token),
            Some(json!({ "body": "first confession" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["message"], json!("success"));

    let (status, body) = api
        .call(Method::GET, "/api/feed?type=all&first=10", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["body"], json!("first confession"));
    assert_eq!(items[0]["author"]["name"], json!("Alice"));
    assert_eq!(body["data"]["page_info"]["has_next_page"], json!(false));

    let post_id = items[0]["id"].as_str().unwrap().to_string();
    let (status, _) = api
        .call(
            Method::POST,
            &format!("/api/posts/{}/like", post_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = api
        .call(Method::GET, &format!("/api/posts/{}", post_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["likes_count"], json!(1));
    assert_eq!(body["data"]["is_liked"], json!(true));
}

#[tokio::test]
async fn user_lookup_hides_credentials() {
    let api = Api::new(RegistrationMode::Credentials);
    let (status, body) = api
        .call(
            Method::POST,
            "/api/auth/register/credentials",
            None,
            Some(json!({ "email": "bob@example.com", "password": "hunter2", "push_token": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (_, menfess) = api.call(Method::GET, "/api/menfess", Some(&token), None).await;
    assert_eq!(menfess["data"]["menfess_list"], json!([]));

    let kampus = api
        .users
        .seed_menfess(Profile::new("Menfess Kampus", "k.png", ""), 1)
        .await
        .unwrap();
    let (status, body) = api
        .call(Method::GET, &format!("/api/users/{}", kampus), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["profile"]["name"], json!("Menfess Kampus"));
    assert!(body["data"].get("account").is_none());
}

#[tokio::test]
async fn errors_map_to_statuses() {
    let api = Api::new(RegistrationMode::Credentials);

    // Validation
    let (status, body) = api
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "not-an-email", "password": "x", "push_token": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_EMAIL");

    // Wrong password for an unknown account
    let (status, body) = api
        .call(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "x", "push_token": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "WRONG_PASSWORD");

    // Registration flow not enabled for this deployment
    let (status, body) = api
        .call(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({ "push_token": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_code(&body), "REGISTRATION_DISABLED");

    // Duplicate email
    let register = json!({ "email": "dup@example.com", "password": "pw", "push_token": "p" });
    let (_, body) = api
        .call(
            Method::POST,
            "/api/auth/register/credentials",
            None,
            Some(register.clone()),
        )
        .await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let (status, _) = api
        .call(Method::POST, "/api/auth/register/credentials", None, Some(register))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Not found
    let (status, body) = api
        .call(Method::GET, "/api/posts/missing", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "POST_NOT_FOUND");

    // Follow feed without follows
    let (status, body) = api
        .call(Method::GET, "/api/feed?type=follow", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "USER_NOT_FOLLOW_ANYONE");

    // Unknown feed type
    let (status, body) = api
        .call(Method::GET, "/api/feed?type=trending", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_FEED_TYPE");
}

#[tokio::test]
async fn logout_then_logout_again_is_fine() {
    let api = Api::new(RegistrationMode::Anonymous);
    let token = api.register("phone-1").await;

    for _ in 0..2 {
        let (status, body) = api
            .call(
                Method::POST,
                "/api/auth/logout",
                Some(&token),
                Some(json!({ "push_token": "phone-1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["message"], json!("success"));
    }
}
