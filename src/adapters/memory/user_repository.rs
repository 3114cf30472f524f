//! In-memory user store.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use super::ids::next_id;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{FollowStatus, NewUser, Profile, User, UserKind};
use crate::ports::UserRepository;

#[derive(Debug, Default)]
struct UserTable {
    users: HashMap<UserId, User>,
    /// Lowercase email to owner.
    emails: HashMap<String, UserId>,
    follows: HashMap<UserId, BTreeSet<UserId>>,
    /// Display order of menfess accounts.
    menfess_rank: HashMap<UserId, i64>,
}

/// Users, accounts and the follow relation behind one lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a menfess broadcast account listed at position `rank`.
    pub async fn seed_menfess(&self, profile: Profile, rank: i64) -> Result<UserId, DomainError> {
        let id = generated_id()?;
        let mut table = self.table.write().await;
        table.users.insert(
            id.clone(),
            User::new(id.clone(), None, profile, UserKind::Menfess),
        );
        table.menfess_rank.insert(id.clone(), rank);
        Ok(id)
    }

    pub async fn count(&self) -> usize {
        self.table.read().await.users.len()
    }
}

fn generated_id() -> Result<UserId, DomainError> {
    UserId::new(next_id()).map_err(|e| DomainError::internal(e.to_string()))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<User, DomainError> {
        self.table
            .read()
            .await
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<User, DomainError> {
        let table = self.table.read().await;
        table
            .emails
            .get(&email.to_lowercase())
            .and_then(|id| table.users.get(id))
            .cloned()
            .ok_or_else(|| DomainError::user_not_found(email))
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, DomainError> {
        let mut table = self.table.write().await;

        let email = user.account.as_ref().map(|a| a.email.to_lowercase());
        if let Some(email) = &email {
            if table.emails.contains_key(email) {
                return Err(DomainError::database("duplicate email").with_detail("email", email));
            }
        }

        let id = generated_id()?;
        if let Some(email) = email {
            table.emails.insert(email, id.clone());
        }
        table.users.insert(
            id.clone(),
            User::new(id.clone(), user.account, user.profile, user.kind),
        );
        Ok(id)
    }

    async fn save_profile(&self, user: &User) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        let stored = table
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DomainError::user_not_found(&user.id))?;
        stored.profile = user.profile.clone();
        Ok(())
    }

    async fn find_menfess_list(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        let mut menfess: Vec<&User> = table.users.values().filter(|u| u.is_menfess()).collect();
        menfess.sort_by_key(|u| {
            let rank = table.menfess_rank.get(&u.id).copied().unwrap_or(i64::MAX);
            (rank, u.id.clone())
        });
        Ok(menfess.into_iter().cloned().collect())
    }

    async fn get_followed_ids(&self, user_id: &UserId) -> Result<Vec<UserId>, DomainError> {
        Ok(self
            .table
            .read()
            .await
            .follows
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn update_follow_status(
        &self,
        follower: &UserId,
        followed: &UserId,
        status: FollowStatus,
    ) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        match status {
            FollowStatus::Active => {
                table
                    .follows
                    .entry(follower.clone())
                    .or_default()
                    .insert(followed.clone());
            }
            FollowStatus::Inactive => {
                if let Some(set) = table.follows.get_mut(follower) {
                    set.remove(followed);
                }
            }
        }
        Ok(())
    }
}
