//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, pagination types and the error types
//! that form the vocabulary of the menfess domain.

mod auth;
mod errors;
mod ids;
mod pagination;

pub use auth::AuthError;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{PostId, UserId};
pub use pagination::{Cursor, Page, PageInfo, PageRequest, DEFAULT_PAGE_SIZE};
