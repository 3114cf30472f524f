//! User repository port.
//!
//! Defines the contract for persisting accounts, profiles and the follow
//! relation. Missing records are reported with the `UserNotFound` sentinel
//! so the orchestrator can tell them apart from infrastructure failures.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{FollowStatus, NewUser, User};

/// Repository port for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no such user exists
    /// - `DatabaseError` on persistence failure
    async fn find_by_id(&self, id: &UserId) -> Result<User, DomainError>;

    /// Find a user by (already lowercased) email.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no account uses this email
    /// - `DatabaseError` on persistence failure
    async fn find_by_email(&self, email: &str) -> Result<User, DomainError>;

    /// Insert a new user, returning the assigned ID.
    async fn insert(&self, user: NewUser) -> Result<UserId, DomainError>;

    /// Overwrite the stored profile of an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user does not exist
    async fn save_profile(&self, user: &User) -> Result<(), DomainError>;

    /// List menfess broadcast accounts in their configured order.
    async fn find_menfess_list(&self) -> Result<Vec<User>, DomainError>;

    /// IDs the user follows. Empty if the user follows nobody.
    async fn get_followed_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError>;

    /// Set the follow relation between two users.
    ///
    /// Implementations must treat this as idempotent: activating an active
    /// relation or deactivating an inactive one is a no-op.
    async fn update_follow_status(
        &self,
        follower: &UserId,
        followed: &UserId,
        status: FollowStatus,
    ) -> Result<(), DomainError>;
}
