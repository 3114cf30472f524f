//! Push notification configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::notification::EXPO_PUSH_URL;

/// Push delivery settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// When false, tokens are still stored but nothing is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Push service endpoint
    #[serde(default = "default_expo_url")]
    pub expo_url: String,

    /// Optional push service access token
    pub access_token: Option<SecretString>,

    /// Messages buffered before new notifications are rejected
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Push request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl NotificationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }
        if !(self.expo_url.starts_with("https://") || self.expo_url.starts_with("http://")) {
            return Err(ValidationError::InvalidPushUrl);
        }
        if self.queue_capacity == 0 {
            return Err(ValidationError::InvalidQueueCapacity);
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            expo_url: default_expo_url(),
            access_token: None,
            queue_capacity: default_queue_capacity(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_expo_url() -> String {
    EXPO_PUSH_URL.to_string()
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_request_timeout() -> u64 {
    10
}
