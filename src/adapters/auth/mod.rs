//! Authentication adapters.
//!
//! - `jwt` - HS256 tokens and argon2 password hashing

mod jwt;

pub use jwt::JwtAuthService;
