//! In-memory persistence adapters.
//!
//! Single-process stores behind `tokio::sync::RwLock`. Each write takes the
//! store lock once, so like/unlike and follow updates are atomic set
//! operations.

mod ids;
mod post_repository;
mod push_token_store;
mod user_repository;

pub use post_repository::InMemoryPostRepository;
pub use push_token_store::InMemoryPushTokenStore;
pub use user_repository::InMemoryUserRepository;
