//! Error log port.
//!
//! Records unexpected failures together with the request that triggered
//! them. Fire-and-forget: nothing is returned and callers never wait on it.

use std::fmt;

use crate::domain::foundation::DomainError;

/// Sink for unexpected failures.
pub trait ErrorLog: Send + Sync {
    /// Record `error`, the failing request `payload`, and a call-site tag
    /// such as `"[LikePost] failed like post"`.
    fn record(&self, error: &DomainError, payload: &dyn fmt::Debug, context: &str);
}
