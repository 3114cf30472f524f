//! User entity and its projections.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// Login credentials. Absent for anonymously registered users.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Lowercased email, unique across the system.
    pub email: String,

    /// Salted password hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl Account {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Public profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub avatar: String,
    pub bio: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            bio: bio.into(),
        }
    }
}

/// Distinguishes ordinary accounts from menfess broadcast accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    #[default]
    Regular,
    Menfess,
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(skip_serializing)]
    pub account: Option<Account>,
    pub profile: Profile,
    pub kind: UserKind,
}

impl User {
    pub fn new(id: UserId, account: Option<Account>, profile: Profile, kind: UserKind) -> Self {
        Self {
            id,
            account,
            profile,
            kind,
        }
    }

    /// The projection embedded in posts.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.profile.name.clone(),
            avatar: self.profile.avatar.clone(),
        }
    }

    pub fn is_menfess(&self) -> bool {
        self.kind == UserKind::Menfess
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    pub account: Option<Account>,
    pub profile: Profile,
    pub kind: UserKind,
}

impl NewUser {
    /// A user with no credentials and an empty profile.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A user with credentials and an empty profile.
    pub fn with_account(account: Account) -> Self {
        Self {
            account: Some(account),
            ..Self::default()
        }
    }
}

/// Display identity of a user, as shown next to posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
}

impl UserSummary {
    /// A summary carrying only the ID, for references not yet resolved.
    pub fn reference(id: UserId) -> Self {
        Self {
            id,
            name: String::new(),
            avatar: String::new(),
        }
    }
}
