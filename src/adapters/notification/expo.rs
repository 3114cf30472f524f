//! Expo push service client.
//!
//! Posts `{to, title, body, data}` to the Expo push endpoint and reads back
//! one ticket per recipient token.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::config::NotificationConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{PushGateway, PushMessage, PushTicket};

pub const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

#[derive(Debug, Deserialize)]
struct ExpoResponse {
    #[serde(default)]
    data: Vec<ExpoTicket>,
}

#[derive(Debug, Deserialize)]
struct ExpoTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<ExpoTicketDetails>,
}

#[derive(Debug, Deserialize)]
struct ExpoTicketDetails {
    #[serde(default)]
    error: Option<String>,
}

impl From<ExpoTicket> for PushTicket {
    fn from(ticket: ExpoTicket) -> Self {
        PushTicket {
            status: ticket.status,
            message: ticket.message,
            error: ticket.details.and_then(|d| d.error),
        }
    }
}

pub struct ExpoPushGateway {
    client: Client,
    url: String,
    access_token: Option<SecretString>,
}

impl ExpoPushGateway {
    pub fn new(
        url: impl Into<String>,
        access_token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Self::error(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            access_token,
        })
    }

    pub fn from_config(config: &NotificationConfig) -> Result<Self, DomainError> {
        Self::new(
            config.expo_url.clone(),
            config.access_token.clone(),
            config.request_timeout(),
        )
    }

    fn error(message: impl Into<String>) -> DomainError {
        DomainError::new(ErrorCode::NotificationError, message)
    }
}

#[async_trait]
impl PushGateway for ExpoPushGateway {
    async fn send(&self, message: &PushMessage) -> Result<Vec<PushTicket>, DomainError> {
        let mut request = self.client.post(&self.url).json(message);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Self::error("push request timed out")
            } else {
                Self::error(format!("failed to send push request: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error(format!("push service returned {}: {}", status, body))
                .with_detail("status", status.as_u16().to_string()));
        }

        let parsed: ExpoResponse = response
            .json()
            .await
            .map_err(|e| Self::error(format!("failed to parse push response: {}", e)))?;

        Ok(parsed.data.into_iter().map(PushTicket::from).collect())
    }
}
