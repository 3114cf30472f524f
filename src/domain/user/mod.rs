//! User module - accounts, profiles and the follow relation.
//!
//! A user is created either anonymously (no credentials, profile filled in
//! later) or through the legacy email/password flow. Profiles are public;
//! the account part never leaves the service.

mod account;
mod follow;

pub use account::{Account, NewUser, Profile, User, UserKind, UserSummary};
pub use follow::FollowStatus;
