//! Follow relation status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Target state of a (follower, followed) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowStatus {
    /// The follower follows the followed user.
    Active,
    /// The relation is removed.
    Inactive,
}

impl FollowStatus {
    /// Status that flips the current membership.
    pub fn toggled_from(currently_following: bool) -> Self {
        if currently_following {
            FollowStatus::Inactive
        } else {
            FollowStatus::Active
        }
    }
}

impl fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowStatus::Active => write!(f, "active"),
            FollowStatus::Inactive => write!(f, "inactive"),
        }
    }
}
