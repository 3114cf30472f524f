//! Domain layer containing the menfess vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, pagination, port errors)
//! - `user` - Accounts, profiles and follow status
//! - `post` - Threaded posts and feed selection

pub mod foundation;
pub mod post;
pub mod user;
