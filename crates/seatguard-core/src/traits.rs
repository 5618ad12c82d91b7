//! Collaborator traits
//!
//! SeatGuard decides and dispatches; everything it reads or sends goes
//! through one of these seams so tests can substitute in-memory doubles.

use crate::error::AppError;
use crate::models::{FailedPayment, Subscription, User};
use async_trait::async_trait;

/// Licensing and site configuration
pub trait LicenseProvider: Send + Sync {
    /// Whether the installation runs under the hosted licensing model
    fn is_cloud_licensed(&self) -> bool;

    /// Maximum active users permitted on the free tier
    fn user_limit(&self) -> i64;

    /// Public site URL linked from notification emails
    fn site_url(&self) -> String;
}

/// Billing provider lookup
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Fetch the tenant's subscription, `None` when the provider has none
    async fn get_subscription(&self, tenant_id: &str) -> Result<Option<Subscription>, AppError>;
}

/// User store queries
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Count active (non-deactivated) users
    async fn count_active_users(&self) -> Result<i64, AppError>;

    /// List active system administrators, one page at a time
    async fn list_admins(&self, page: &Pagination) -> Result<Vec<User>, AppError>;
}

/// Email sending, one operation per notification kind
///
/// Each call is independent: a failure for one recipient says nothing
/// about the next.
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send_at_user_limit_warning(
        &self,
        email: &str,
        locale: &str,
        site_url: &str,
    ) -> Result<(), AppError>;

    async fn send_over_user_limit_warning(
        &self,
        email: &str,
        locale: &str,
        site_url: &str,
    ) -> Result<(), AppError>;

    async fn send_payment_failed(
        &self,
        email: &str,
        locale: &str,
        failed_payment: &FailedPayment,
        site_url: &str,
    ) -> Result<(), AppError>;

    async fn send_no_card_payment_failed(
        &self,
        email: &str,
        locale: &str,
        site_url: &str,
    ) -> Result<(), AppError>;
}

/// Pagination parameters (zero-based pages)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(0),
            per_page: per_page.clamp(1, 1000),
        }
    }

    /// First page with the given size
    pub fn first(per_page: i64) -> Self {
        Self::new(0, per_page)
    }

    pub fn offset(&self) -> i64 {
        self.page * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(100)
    }
}
