//! In-memory device push-token store.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::PushTokenStore;

/// Token sets per user. A user keeps their record once created, even if
/// every token is later removed.
#[derive(Debug, Default)]
pub struct InMemoryPushTokenStore {
    tokens: RwLock<HashMap<UserId, BTreeSet<String>>>,
}

impl InMemoryPushTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PushTokenStore for InMemoryPushTokenStore {
    async fn add(&self, user_id: &UserId, token: &str) -> Result<(), DomainError> {
        self.tokens
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .insert(token.to_string());
        Ok(())
    }

    async fn remove(&self, user_id: &UserId, token: &str) -> Result<(), DomainError> {
        let mut tokens = self.tokens.write().await;
        let set = tokens
            .get_mut(user_id)
            .ok_or_else(|| DomainError::user_not_found(user_id))?;
        set.remove(token);
        Ok(())
    }

    async fn tokens_for(&self, user_id: &UserId) -> Result<Vec<String>, DomainError> {
        Ok(self
            .tokens
            .read()
            .await
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn all_except(&self, user_id: &UserId) -> Result<Vec<String>, DomainError> {
        Ok(self
            .tokens
            .read()
            .await
            .iter()
            .filter(|(owner, _)| *owner != user_id)
            .flat_map(|(_, set)| set.iter().cloned())
            .collect())
    }

    async fn remove_tokens(&self, dead: &[String]) -> Result<(), DomainError> {
        let mut tokens = self.tokens.write().await;
        for set in tokens.values_mut() {
            set.retain(|t| !dead.contains(t));
        }
        Ok(())
    }
}
