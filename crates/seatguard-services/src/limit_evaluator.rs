//! Limit evaluator
//!
//! Computes remaining seat capacity for a tenant and classifies it.
//!
//! Only the exact boundaries produce a warning: `remaining == 0` and
//! `remaining == -1`. A tenant further over the limit classifies as
//! `Under`, so the over-limit warning goes out once, on the tick the count
//! first reaches `limit + 1`, and is not repeated while it stays higher.

use seatguard_core::{
    models::{LimitClassification, PlanTier, SubscriptionState, TenantContext},
    traits::{BillingProvider, LicenseProvider, UserStore},
    AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::constants::{AT_LIMIT_REMAINING, ONE_OVER_LIMIT_REMAINING};

/// Classify a seat count against a subscription state
///
/// Pure function of its inputs.
pub fn classify(state: &SubscriptionState, seat_count: i64) -> LimitClassification {
    if !state.is_limited() {
        return LimitClassification::NotApplicable;
    }

    let remaining = state.user_limit.saturating_sub(seat_count);
    match remaining {
        r if r > AT_LIMIT_REMAINING => LimitClassification::Under,
        AT_LIMIT_REMAINING => LimitClassification::AtLimit,
        ONE_OVER_LIMIT_REMAINING => LimitClassification::OneOverLimit,
        _ => LimitClassification::Under,
    }
}

/// Limit evaluator
///
/// Gathers the subscription state and seat count from its collaborators and
/// classifies them. Lookups are skipped once the outcome is known: an
/// unlicensed tenant never hits the billing provider, a paid one never hits
/// the user store.
pub struct LimitEvaluator<L: LicenseProvider, B: BillingProvider, U: UserStore> {
    license: Arc<L>,
    billing: Arc<B>,
    users: Arc<U>,
}

impl<L: LicenseProvider, B: BillingProvider, U: UserStore> LimitEvaluator<L, B, U> {
    /// Create a new limit evaluator
    pub fn new(license: Arc<L>, billing: Arc<B>, users: Arc<U>) -> Self {
        Self {
            license,
            billing,
            users,
        }
    }

    /// Evaluate the tenant's current seat usage
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's error unchanged if the subscription or
    /// seat count lookup fails.
    #[instrument(skip(self, ctx), fields(tenant_id = %ctx.tenant_id))]
    pub async fn evaluate(&self, ctx: &TenantContext) -> AppResult<LimitClassification> {
        if !self.license.is_cloud_licensed() {
            debug!("Not a cloud instance, skipping user limit check");
            return Ok(LimitClassification::NotApplicable);
        }

        let plan_tier = self
            .billing
            .get_subscription(&ctx.tenant_id)
            .await?
            .map(|s| s.plan_tier())
            .unwrap_or(PlanTier::Free);

        let state = SubscriptionState::new(true, plan_tier, self.license.user_limit());
        if !state.is_limited() {
            debug!("Paid subscription, skipping user limit check");
            return Ok(LimitClassification::NotApplicable);
        }

        let seat_count = self.users.count_active_users().await?;
        let classification = classify(&state, seat_count);

        info!(
            "User limit check: {} of {} seats used, {}",
            seat_count, state.user_limit, classification
        );

        Ok(classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn free(limit: i64) -> SubscriptionState {
        SubscriptionState::new(true, PlanTier::Free, limit)
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(&free(10), 9), LimitClassification::Under);
        assert_eq!(classify(&free(10), 10), LimitClassification::AtLimit);
        assert_eq!(classify(&free(10), 11), LimitClassification::OneOverLimit);
        assert_eq!(classify(&free(10), 12), LimitClassification::Under);
        assert_eq!(classify(&free(10), 0), LimitClassification::Under);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(classify(&free(0), 0), LimitClassification::AtLimit);
        assert_eq!(classify(&free(0), 1), LimitClassification::OneOverLimit);
    }

    #[test]
    fn test_extreme_limits_do_not_overflow() {
        assert_eq!(classify(&free(i64::MIN), 1), LimitClassification::Under);
        assert_eq!(classify(&free(i64::MIN), i64::MAX), LimitClassification::Under);
        assert_eq!(classify(&free(i64::MAX), 0), LimitClassification::Under);
        assert_eq!(classify(&free(-5), 3), LimitClassification::Under);
    }

    #[test]
    fn test_not_applicable() {
        let paid = SubscriptionState::new(true, PlanTier::Paid, 10);
        assert_eq!(classify(&paid, 10), LimitClassification::NotApplicable);

        let self_hosted = SubscriptionState::new(false, PlanTier::Free, 10);
        assert_eq!(classify(&self_hosted, 11), LimitClassification::NotApplicable);
    }

    proptest! {
        #[test]
        fn prop_free_tier_classification(limit in 0i64..10_000, seats in 0i64..20_000) {
            let expected = if seats == limit {
                LimitClassification::AtLimit
            } else if seats == limit + 1 {
                LimitClassification::OneOverLimit
            } else {
                LimitClassification::Under
            };
            prop_assert_eq!(classify(&free(limit), seats), expected);
        }

        #[test]
        fn prop_unlimited_tenants_not_applicable(
            licensed in any::<bool>(),
            limit in 0i64..10_000,
            seats in 0i64..20_000,
        ) {
            let tier = if licensed { PlanTier::Paid } else { PlanTier::Free };
            let state = SubscriptionState::new(licensed, tier, limit);
            prop_assert_eq!(classify(&state, seats), LimitClassification::NotApplicable);
        }
    }
}
