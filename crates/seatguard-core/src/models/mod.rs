//! Domain models for SeatGuard
//!
//! This module contains the transient values a check cycle works with.
//! None of them are persisted by SeatGuard itself.

pub mod limit;
pub mod notification;
pub mod subscription;
pub mod user;

pub use limit::LimitClassification;
pub use notification::{FailedPayment, NotificationEvent, NotificationKind, TenantContext};
pub use subscription::{PlanTier, Subscription, SubscriptionState};
pub use user::{AdminRecipient, User, UserRole, SYSTEM_ADMIN_ROLE_ID, SYSTEM_USER_ROLE_ID};
