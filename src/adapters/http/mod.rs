//! HTTP adapter - REST API over the menfess orchestrator.
//!
//! - `dto` - response envelope and wire request types
//! - `handlers` - one handler per use case, plus the error-to-status mapping
//! - `middleware` - bearer-token authentication
//! - `routes` - route table and layers

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use routes::{api_routes, app_router, HttpSettings};
