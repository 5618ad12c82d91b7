//! HTTP billing provider client
//!
//! Looks up a tenant's subscription from the billing provider's REST API.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use seatguard_core::{
    config::BillingConfig, models::Subscription, traits::BillingProvider, AppError, AppResult,
};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Billing provider reached over HTTP
pub struct HttpBillingProvider {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpBillingProvider {
    /// Create a new billing provider client
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root (e.g. "https://billing.example.com/api/v1")
    /// * `api_key` - Optional bearer token
    /// * `timeout_ms` - Per-request timeout in milliseconds
    pub fn new(base_url: &str, api_key: Option<String>, timeout_ms: u64) -> AppResult<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| AppError::BillingProvider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a client from the billing section of the configuration
    pub fn from_config(config: &BillingConfig) -> AppResult<Self> {
        Self::new(&config.base_url, config.api_key.clone(), config.timeout_ms)
    }

    fn subscription_url(&self) -> String {
        format!("{}/subscription", self.base_url)
    }
}

#[async_trait]
impl BillingProvider for HttpBillingProvider {
    #[instrument(skip(self))]
    async fn get_subscription(&self, tenant_id: &str) -> AppResult<Option<Subscription>> {
        let url = self.subscription_url();
        debug!("Fetching subscription from {}", url);

        let mut request = self
            .http_client
            .get(&url)
            .query(&[("tenant_id", tenant_id)]);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            error!("Billing provider request failed: {}", e);
            AppError::BillingProvider(format!("Request failed: {}", e))
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("No subscription for tenant {}", tenant_id);
                Ok(None)
            }
            status if status.is_success() => {
                let subscription = response.json::<Subscription>().await.map_err(|e| {
                    error!("Failed to decode subscription: {}", e);
                    AppError::SubscriptionLookup(format!("Invalid subscription payload: {}", e))
                })?;
                Ok(Some(subscription))
            }
            status => {
                error!("Billing provider returned status {}", status);
                Err(AppError::SubscriptionLookup(format!(
                    "Billing provider returned status {}",
                    status.as_u16()
                )))
            }
        }
    }
}
