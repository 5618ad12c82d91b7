//! Cloud notification service
//!
//! Runs one user limit check cycle or one payment failure event end to end:
//! evaluate (limit checks only), resolve administrators, fan out.

use seatguard_core::{
    models::{FailedPayment, NotificationEvent, NotificationKind, TenantContext},
    traits::{BillingProvider, EmailService, LicenseProvider, UserStore},
    AppResult,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::admin_notifier::{AdminNotifier, DispatchReport};
use crate::limit_evaluator::LimitEvaluator;
use crate::recipients::RecipientResolver;

/// Cloud notification service
///
/// Stateless between calls; every cycle re-reads the subscription, the seat
/// count and the administrator list.
pub struct CloudNotificationService<L, B, U, E>
where
    L: LicenseProvider,
    B: BillingProvider,
    U: UserStore,
    E: EmailService,
{
    license: Arc<L>,
    evaluator: LimitEvaluator<L, B, U>,
    resolver: RecipientResolver<U>,
    notifier: AdminNotifier<E>,
}

impl<L, B, U, E> CloudNotificationService<L, B, U, E>
where
    L: LicenseProvider,
    B: BillingProvider,
    U: UserStore,
    E: EmailService,
{
    /// Create a new service
    pub fn new(license: Arc<L>, billing: Arc<B>, users: Arc<U>, email: Arc<E>) -> Self {
        Self {
            evaluator: LimitEvaluator::new(license.clone(), billing, users.clone()),
            resolver: RecipientResolver::new(users),
            notifier: AdminNotifier::new(email),
            license,
        }
    }

    /// Override how many administrators are notified per cycle
    pub fn with_admin_page_size(mut self, per_page: i64) -> Self {
        self.resolver = self.resolver.with_page_size(per_page);
        self
    }

    /// Build the tenant context from the license provider's site URL
    pub fn tenant_context(&self, tenant_id: impl Into<String>) -> TenantContext {
        TenantContext::new(tenant_id, self.license.site_url())
    }

    /// Check the tenant's seat usage and warn administrators at the boundaries
    ///
    /// Returns `None` when no warning was due.
    ///
    /// # Errors
    ///
    /// Propagates subscription, seat count and administrator lookup failures.
    /// Delivery failures are reported, never returned.
    #[instrument(skip(self, ctx), fields(tenant_id = %ctx.tenant_id))]
    pub async fn check_user_limit(&self, ctx: &TenantContext) -> AppResult<Option<DispatchReport>> {
        let classification = self.evaluator.evaluate(ctx).await?;

        let kind = match classification.warning() {
            Some(kind) => kind,
            None => {
                debug!("No user limit warning due ({})", classification);
                return Ok(None);
            }
        };

        info!("User limit warning due: {}", kind);
        let event = NotificationEvent::for_kind(kind, ctx, None);
        self.dispatch_to_admins(&event).await.map(Some)
    }

    /// `check_user_limit` without the per-recipient report
    pub async fn check_and_send_user_limit_warnings(&self, ctx: &TenantContext) -> AppResult<()> {
        self.check_user_limit(ctx).await?;
        Ok(())
    }

    /// Notify administrators that a subscription payment failed
    #[instrument(skip(self, ctx, failed_payment), fields(tenant_id = %ctx.tenant_id))]
    pub async fn send_payment_failed(
        &self,
        ctx: &TenantContext,
        failed_payment: FailedPayment,
    ) -> AppResult<()> {
        let event = NotificationEvent::for_kind(NotificationKind::PaymentFailed, ctx, Some(failed_payment));
        self.dispatch_to_admins(&event).await?;
        Ok(())
    }

    /// Notify administrators that a payment failed for lack of a card on file
    #[instrument(skip(self, ctx), fields(tenant_id = %ctx.tenant_id))]
    pub async fn send_no_card_payment_failed(&self, ctx: &TenantContext) -> AppResult<()> {
        let event = NotificationEvent::for_kind(NotificationKind::NoCardPaymentFailed, ctx, None);
        self.dispatch_to_admins(&event).await?;
        Ok(())
    }

    async fn dispatch_to_admins(&self, event: &NotificationEvent) -> AppResult<DispatchReport> {
        let recipients = self.resolver.resolve_admins().await?;
        Ok(self.notifier.dispatch(event, &recipients).await)
    }
}
