//! Subscription model
//!
//! Represents the tenant's billing subscription as reported by the billing
//! provider, and the per-check snapshot the limit evaluator works from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plan tier enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - subject to the cloud user limit
    #[default]
    Free,
    /// Paid tier - no user limit warnings
    Paid,
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanTier::Free => write!(f, "free"),
            PlanTier::Paid => write!(f, "paid"),
        }
    }
}

impl PlanTier {
    /// Check if this tier is paid
    pub fn is_paid(&self) -> bool {
        matches!(self, PlanTier::Paid)
    }
}

/// Subscription entity
///
/// The billing provider reports the paid flag as the string `"true"` or
/// `"false"`; anything other than `"true"` counts as the free tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    /// Subscription identifier at the billing provider
    pub id: String,

    /// Customer identifier at the billing provider
    pub customer_id: String,

    /// Paid tier flag as reported by the provider
    #[serde(default)]
    pub is_paid_tier: String,

    /// Start of the subscription
    #[serde(default)]
    pub start_at: Option<DateTime<Utc>>,

    /// End of the subscription (None = open ended)
    #[serde(default)]
    pub end_at: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Resolve the plan tier from the provider flag
    pub fn plan_tier(&self) -> PlanTier {
        if self.is_paid_tier == "true" {
            PlanTier::Paid
        } else {
            PlanTier::Free
        }
    }
}

/// Snapshot of a tenant's licensing and plan, immutable for one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionState {
    pub is_cloud_licensed: bool,
    pub plan_tier: PlanTier,
    pub user_limit: i64,
}

impl SubscriptionState {
    pub fn new(is_cloud_licensed: bool, plan_tier: PlanTier, user_limit: i64) -> Self {
        Self {
            is_cloud_licensed,
            plan_tier,
            user_limit,
        }
    }

    /// Whether user limit warnings apply to this tenant at all
    pub fn is_limited(&self) -> bool {
        self.is_cloud_licensed && !self.plan_tier.is_paid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(flag: &str) -> Subscription {
        Subscription {
            id: "sub_1".to_string(),
            customer_id: "cus_1".to_string(),
            is_paid_tier: flag.to_string(),
            start_at: None,
            end_at: None,
        }
    }

    #[test]
    fn test_plan_tier_from_flag() {
        assert_eq!(subscription("true").plan_tier(), PlanTier::Paid);
        assert_eq!(subscription("false").plan_tier(), PlanTier::Free);
        assert_eq!(subscription("").plan_tier(), PlanTier::Free);
        assert_eq!(subscription("TRUE").plan_tier(), PlanTier::Free);
    }

    #[test]
    fn test_is_limited() {
        assert!(SubscriptionState::new(true, PlanTier::Free, 10).is_limited());
        assert!(!SubscriptionState::new(true, PlanTier::Paid, 10).is_limited());
        assert!(!SubscriptionState::new(false, PlanTier::Free, 10).is_limited());
    }

    #[test]
    fn test_subscription_deserialize() {
        let json = r#"{"id":"sub_9","customer_id":"cus_9","is_paid_tier":"true"}"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.plan_tier(), PlanTier::Paid);
        assert!(sub.end_at.is_none());
    }
}
