//! Feed selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Which top-level posts a feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    /// Every top-level post.
    All,
    /// Only posts by authors the viewer follows.
    Follow,
}

impl FromStr for FeedType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FeedType::All),
            "follow" => Ok(FeedType::Follow),
            other => Err(ValidationError::invalid_format(
                "type",
                format!("unknown feed type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedType::All => write!(f, "all"),
            FeedType::Follow => write!(f, "follow"),
        }
    }
}
