//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the orchestrator and the outside world. Adapters implement these ports.
//!
//! ## Orchestrator Ports
//!
//! - `UserRepository` / `PostRepository` - persistence
//! - `AuthService` - password hashing and token issuance
//! - `Notifier` - push-token registry and notifications
//! - `ErrorLog` - sink for unexpected failures
//!
//! ## Transport and Delivery Ports
//!
//! - `TokenValidator` - bearer token to `UserId`
//! - `PushTokenStore` / `PushGateway` - push notification delivery

mod auth_service;
mod error_log;
mod notifier;
mod post_repository;
mod push;
mod user_repository;

pub use auth_service::{AuthService, TokenValidator};
pub use error_log::ErrorLog;
pub use notifier::Notifier;
pub use post_repository::{PostQuery, PostRepository};
pub use push::{PushData, PushGateway, PushMessage, PushTicket, PushTokenStore};
pub use user_repository::UserRepository;
