//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use tracing::debug;

use crate::traits::LicenseProvider;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub license: LicenseConfig,
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub billing: BillingConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Licensing configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LicenseConfig {
    /// Whether the installation runs under the hosted (cloud) license
    #[serde(default)]
    pub cloud: bool,

    /// Maximum active users on the free tier
    #[serde(default = "default_user_limit")]
    pub user_limit: i64,
}

fn default_user_limit() -> i64 {
    10
}

/// Site and tenant identity
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Public site URL
    pub site_url: String,

    /// Tenant identifier used for the billing provider lookup
    pub tenant_id: String,
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Billing provider configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BillingConfig {
    /// Base URL of the billing provider API
    pub base_url: String,

    /// Bearer token for the billing provider
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_http_timeout")]
    pub timeout_ms: u64,
}

fn default_http_timeout() -> u64 {
    5000
}

/// Outgoing email configuration
#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Mail relay endpoint; messages are only logged when unset
    pub relay_url: Option<String>,

    /// Bearer token for the mail relay
    pub api_key: Option<String>,

    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Locale used when a recipient's locale has no templates
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_http_timeout")]
    pub timeout_ms: u64,
}

fn default_from_address() -> String {
    "no-reply@seatguard.local".to_string()
}

fn default_from_name() -> String {
    "SeatGuard".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

/// Notification fan-out configuration
#[derive(Debug, Deserialize, Clone)]
pub struct NotificationConfig {
    /// Administrators fetched per cycle; only the first page is notified
    #[serde(default = "default_admin_page_size")]
    pub admin_page_size: i64,
}

fn default_admin_page_size() -> i64 {
    100
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            admin_page_size: default_admin_page_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        debug!("Loading configuration for run mode {}", run_mode);

        let config = Config::builder()
            // Start with default values
            .set_default("license.cloud", false)?
            .set_default("license.user_limit", 10)?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.idle_timeout_secs", 600)?
            .set_default("billing.timeout_ms", 5000)?
            .set_default("email.from_address", "no-reply@seatguard.local")?
            .set_default("email.from_name", "SeatGuard")?
            .set_default("email.default_locale", "en")?
            .set_default("email.timeout_ms", 5000)?
            .set_default("notifications.admin_page_size", 100)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with SEATGUARD_ prefix
            .add_source(
                Environment::with_prefix("SEATGUARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("SEATGUARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

/// `LicenseProvider` backed by the loaded configuration
#[derive(Debug, Clone)]
pub struct ConfigLicenseProvider {
    license: LicenseConfig,
    site_url: String,
}

impl ConfigLicenseProvider {
    pub fn new(license: LicenseConfig, site_url: impl Into<String>) -> Self {
        Self {
            license,
            site_url: site_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.license.clone(), config.service.site_url.clone())
    }
}

impl LicenseProvider for ConfigLicenseProvider {
    fn is_cloud_licensed(&self) -> bool {
        self.license.cloud
    }

    fn user_limit(&self) -> i64 {
        self.license.user_limit
    }

    fn site_url(&self) -> String {
        self.site_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Result<AppConfig, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    const MINIMAL: &str = r#"
        [license]
        cloud = true

        [service]
        site_url = "https://acme.example.com"
        tenant_id = "acme"

        [database]
        url = "postgresql://localhost/seatguard"

        [billing]
        base_url = "https://billing.example.com/api/v1"

        [email]
    "#;

    #[test]
    fn test_defaults_applied() {
        let config = parse(MINIMAL).unwrap();
        assert!(config.license.cloud);
        assert_eq!(config.license.user_limit, 10);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.billing.timeout_ms, 5000);
        assert!(config.email.relay_url.is_none());
        assert_eq!(config.email.default_locale, "en");
        assert_eq!(config.notifications.admin_page_size, 100);
    }

    #[test]
    fn test_missing_required_section_fails() {
        let result = parse(
            r#"
            [license]
            cloud = true
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_license_provider_from_config() {
        let mut config = parse(MINIMAL).unwrap();
        config.license.user_limit = 25;

        let provider = ConfigLicenseProvider::from_config(&config);
        assert!(provider.is_cloud_licensed());
        assert_eq!(provider.user_limit(), 25);
        assert_eq!(provider.site_url(), "https://acme.example.com");
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("seatguard-config-{}.toml", std::process::id()));
        std::fs::write(&path, MINIMAL).unwrap();

        let config = AppConfig::from_file(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!(config.service.tenant_id, "acme");
        assert_eq!(config.license.user_limit, 10);
    }
}
