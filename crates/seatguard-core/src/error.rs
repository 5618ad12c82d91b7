//! Unified error handling for SeatGuard
//!
//! Every failure in the notifier falls into one of two classes:
//!
//! - **Dependency** errors come from a collaborator lookup (subscription,
//!   seat count, administrator list). They abort the current check cycle
//!   and are returned to the caller unchanged.
//! - **Delivery** errors come from sending a single email. They are logged
//!   against the recipient and never fail the cycle.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Dependency Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Subscription lookup failed: {0}")]
    SubscriptionLookup(String),

    #[error("Billing provider error: {0}")]
    BillingProvider(String),

    #[error("Seat count lookup failed: {0}")]
    SeatCount(String),

    #[error("Administrator lookup failed: {0}")]
    AdminLookup(String),

    // ==================== Delivery Errors ====================
    #[error("Email delivery failed: {0}")]
    Delivery(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Mail transport error: {0}")]
    Transport(String),

    // ==================== Internal Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error came from a collaborator lookup and must abort the cycle
    pub fn is_dependency(&self) -> bool {
        matches!(
            self,
            AppError::Database(_)
                | AppError::Pool(_)
                | AppError::SubscriptionLookup(_)
                | AppError::BillingProvider(_)
                | AppError::SeatCount(_)
                | AppError::AdminLookup(_)
        )
    }

    /// Whether this error is a per-recipient send failure
    pub fn is_delivery(&self) -> bool {
        matches!(
            self,
            AppError::Delivery(_) | AppError::Template(_) | AppError::Transport(_)
        )
    }

    /// Returns a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::SubscriptionLookup(_) => "subscription_lookup_error",
            AppError::BillingProvider(_) => "billing_provider_error",
            AppError::SeatCount(_) => "seat_count_error",
            AppError::AdminLookup(_) => "admin_lookup_error",
            AppError::Delivery(_) => "delivery_error",
            AppError::Template(_) => "template_error",
            AppError::Transport(_) => "transport_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(AppError::AdminLookup("timeout".to_string()).is_dependency());
        assert!(AppError::SeatCount("timeout".to_string()).is_dependency());
        assert!(AppError::Database("down".to_string()).is_dependency());
        assert!(!AppError::Delivery("smtp".to_string()).is_dependency());

        assert!(AppError::Transport("refused".to_string()).is_delivery());
        assert!(AppError::Template("missing".to_string()).is_delivery());
        assert!(!AppError::Config("bad".to_string()).is_delivery());
        assert!(!AppError::BillingProvider("503".to_string()).is_delivery());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::SubscriptionLookup("x".to_string()).error_code(),
            "subscription_lookup_error"
        );
        assert_eq!(
            AppError::Delivery("x".to_string()).error_code(),
            "delivery_error"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::AdminLookup("connection reset".to_string());
        assert_eq!(
            err.to_string(),
            "Administrator lookup failed: connection reset"
        );
    }
}
