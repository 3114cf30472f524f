//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the orchestrator to concrete infrastructure:
//! - `auth` - JWT tokens and argon2 password hashing
//! - `http` - axum REST API
//! - `logging` - tracing-backed error log
//! - `memory` - in-memory user, post and push-token stores
//! - `notification` - push delivery through the Expo service

pub mod auth;
pub mod http;
pub mod logging;
pub mod memory;
pub mod notification;

pub use auth::JwtAuthService;
pub use logging::TracingErrorLog;
pub use memory::{InMemoryPostRepository, InMemoryPushTokenStore, InMemoryUserRepository};
pub use notification::{ExpoPushGateway, NotificationDispatcher, PushNotifier};
