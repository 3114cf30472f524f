//! [`ErrorLog`] that writes to the `tracing` pipeline.

use std::fmt;

use crate::domain::foundation::DomainError;
use crate::ports::ErrorLog;

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorLog;

impl TracingErrorLog {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorLog for TracingErrorLog {
    fn record(&self, error: &DomainError, payload: &dyn fmt::Debug, context: &str) {
        tracing::error!(
            code = %error.code,
            error = %error.message,
            payload = ?payload,
            "{}",
            context
        );
    }
}
