//! Business logic services for SeatGuard
//!
//! This crate holds the decision-and-dispatch core: classify a tenant's seat
//! usage, and fan notifications out to the tenant's administrators.
//!
//! # Architecture
//!
//! Services own their collaborators behind `Arc` and the traits from
//! seatguard-core, so every piece can be exercised with in-memory doubles:
//! - Collaborator lookups fail the cycle (`AppError::is_dependency`)
//! - Per-recipient send failures are logged and never fail the cycle
//! - All entry points are instrumented with tracing
//!
//! # Services
//!
//! - `LimitEvaluator` - seat capacity classification
//! - `RecipientResolver` - first page of active system administrators
//! - `AdminNotifier` - per-recipient fan-out with failure isolation
//! - `CloudNotificationService` - one check cycle or payment event end to end
//! - `HttpBillingProvider` - subscription lookup over HTTP

pub mod admin_notifier;
pub mod billing_client;
pub mod cloud_notifications;
pub mod limit_evaluator;
pub mod recipients;

pub use admin_notifier::{AdminNotifier, DeliveryOutcome, DispatchReport};
pub use billing_client::HttpBillingProvider;
pub use cloud_notifications::CloudNotificationService;
pub use limit_evaluator::{classify, LimitEvaluator};
pub use recipients::RecipientResolver;

/// Business logic constants
pub mod constants {
    /// Administrators notified per cycle (first page only)
    pub const ADMIN_PAGE_SIZE: i64 = 100;

    /// Seats remaining at which the at-limit warning is sent
    pub const AT_LIMIT_REMAINING: i64 = 0;

    /// Seats remaining at which the over-limit warning is sent
    pub const ONE_OVER_LIMIT_REMAINING: i64 = -1;
}
