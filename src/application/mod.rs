//! Application layer - request validation and the orchestrator.
//!
//! `requests` turns raw transport input into validated commands;
//! `service` runs each use case against the ports.

mod error;
pub mod requests;
pub mod service;

pub use error::ServiceError;
pub use requests::Validate;
pub use service::{
    Adapters, GetMenfessListResult, MenfessService, MessageResult, RegistrationMode, TokenResult,
};
