//! Notification events and the tenant context they are sent for

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant the current check cycle runs for
///
/// Passed explicitly through every evaluator and notifier call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantContext {
    /// Identifier used for the billing provider lookup
    pub tenant_id: String,

    /// Public URL of the tenant's site, linked from every email
    pub site_url: String,
}

impl TenantContext {
    pub fn new(tenant_id: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            site_url: site_url.into(),
        }
    }
}

/// Details of a failed subscription payment
///
/// Opaque to the notifier; only the email layer renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPayment {
    /// Card brand (e.g. "Visa")
    #[serde(default)]
    pub card_brand: Option<String>,

    /// Last four digits of the card
    #[serde(default)]
    pub last_four: Option<String>,

    /// Reason reported by the payment processor
    #[serde(default)]
    pub failure_message: String,

    /// Amount that failed to be charged
    #[serde(default)]
    pub amount: Option<Decimal>,

    /// ISO currency code of the amount
    #[serde(default)]
    pub currency: Option<String>,

    /// When the processor will retry the charge
    #[serde(default)]
    pub next_retry_at: Option<DateTime<Utc>>,
}

/// Kind of notification, one email template per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AtLimitWarning,
    OverLimitWarning,
    PaymentFailed,
    NoCardPaymentFailed,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::AtLimitWarning,
        NotificationKind::OverLimitWarning,
        NotificationKind::PaymentFailed,
        NotificationKind::NoCardPaymentFailed,
    ];

    /// Template name used by the email layer
    pub fn template_name(&self) -> &'static str {
        match self {
            NotificationKind::AtLimitWarning => "at_user_limit",
            NotificationKind::OverLimitWarning => "over_user_limit",
            NotificationKind::PaymentFailed => "payment_failed",
            NotificationKind::NoCardPaymentFailed => "payment_failed_no_card",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template_name())
    }
}

/// A notification to fan out to administrators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    AtLimitWarning { site_url: String },
    OverLimitWarning { site_url: String },
    PaymentFailed { site_url: String, details: FailedPayment },
    NoCardPaymentFailed { site_url: String },
}

impl NotificationEvent {
    /// Build the event for a notification kind
    ///
    /// `details` is only used for `PaymentFailed`; a missing value renders
    /// with empty failure details.
    pub fn for_kind(kind: NotificationKind, ctx: &TenantContext, details: Option<FailedPayment>) -> Self {
        let site_url = ctx.site_url.clone();
        match kind {
            NotificationKind::AtLimitWarning => NotificationEvent::AtLimitWarning { site_url },
            NotificationKind::OverLimitWarning => NotificationEvent::OverLimitWarning { site_url },
            NotificationKind::PaymentFailed => NotificationEvent::PaymentFailed {
                site_url,
                details: details.unwrap_or_default(),
            },
            NotificationKind::NoCardPaymentFailed => {
                NotificationEvent::NoCardPaymentFailed { site_url }
            }
        }
    }

    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationEvent::AtLimitWarning { .. } => NotificationKind::AtLimitWarning,
            NotificationEvent::OverLimitWarning { .. } => NotificationKind::OverLimitWarning,
            NotificationEvent::PaymentFailed { .. } => NotificationKind::PaymentFailed,
            NotificationEvent::NoCardPaymentFailed { .. } => NotificationKind::NoCardPaymentFailed,
        }
    }

    pub fn site_url(&self) -> &str {
        match self {
            NotificationEvent::AtLimitWarning { site_url }
            | NotificationEvent::OverLimitWarning { site_url }
            | NotificationEvent::PaymentFailed { site_url, .. }
            | NotificationEvent::NoCardPaymentFailed { site_url } => site_url,
        }
    }
}
