//! Mail transports
//!
//! A transport delivers one already-rendered message. Delivery reliability
//! (queuing, retries, bounces) belongs to whatever sits behind it.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use seatguard_core::{AppError, AppResult};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// A single outgoing message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from_address: String,
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Delivery seam for rendered emails
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutgoingEmail) -> AppResult<()>;
}

/// Transport posting messages as JSON to an HTTP mail relay
pub struct HttpMailTransport {
    http_client: Client,
    relay_url: String,
    api_key: Option<String>,
}

impl HttpMailTransport {
    /// Create a new relay transport
    ///
    /// # Arguments
    ///
    /// * `relay_url` - Endpoint accepting `OutgoingEmail` as JSON
    /// * `api_key` - Optional bearer token
    /// * `timeout_ms` - Per-request timeout in milliseconds
    pub fn new(relay_url: &str, api_key: Option<String>, timeout_ms: u64) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            relay_url: relay_url.to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    #[instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: &OutgoingEmail) -> AppResult<()> {
        debug!("Posting email to relay {}", self.relay_url);

        let mut request = self.http_client.post(&self.relay_url).json(message);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Mail relay request failed: {}", e);
            AppError::Transport(format!("Mail relay request failed: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Mail relay rejected message: status {} body {}", status, body);
            return Err(AppError::Delivery(format!(
                "Mail relay returned status {}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}

/// Transport that only records messages in the log
///
/// Used when no relay is configured.
#[derive(Debug, Clone, Default)]
pub struct LogMailTransport;

impl LogMailTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogMailTransport {
    async fn send(&self, message: &OutgoingEmail) -> AppResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email not sent, no mail relay configured"
        );
        Ok(())
    }
}
