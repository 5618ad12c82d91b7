//! Admin notifier
//!
//! Fans one notification event out to every resolved administrator. Each
//! send is attempted independently: a failed delivery is logged against the
//! recipient and the loop moves on.

use seatguard_core::{
    models::{AdminRecipient, NotificationEvent, NotificationKind},
    traits::EmailService,
    AppError, AppResult,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Result of one delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub username: String,
    pub email: String,
    pub result: Result<(), AppError>,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-recipient outcomes of one fan-out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub kind: NotificationKind,
    pub outcomes: Vec<DeliveryOutcome>,
}

impl DispatchReport {
    fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            outcomes: Vec::new(),
        }
    }

    /// Number of send attempts made
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of sends that succeeded
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Outcomes whose send failed
    pub fn failures(&self) -> impl Iterator<Item = &DeliveryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_delivered())
    }
}

/// Admin notifier
pub struct AdminNotifier<E: EmailService> {
    email: Arc<E>,
}

impl<E: EmailService> AdminNotifier<E> {
    /// Create a new notifier
    pub fn new(email: Arc<E>) -> Self {
        Self { email }
    }

    /// Send the event to every recipient and report each outcome
    ///
    /// Never fails: delivery errors are recorded in the report and logged
    /// with the recipient's username.
    #[instrument(skip(self, event, recipients), fields(kind = %event.kind(), recipients = recipients.len()))]
    pub async fn dispatch(
        &self,
        event: &NotificationEvent,
        recipients: &[AdminRecipient],
    ) -> DispatchReport {
        let mut report = DispatchReport::new(event.kind());

        for recipient in recipients {
            let result = self.send(event, recipient).await;

            match &result {
                Ok(()) => debug!("Sent {} to {}", event.kind(), recipient.username),
                Err(e) => error!(
                    username = %recipient.username,
                    error = %e,
                    "Error sending {} email to admin",
                    event.kind()
                ),
            }

            report.outcomes.push(DeliveryOutcome {
                username: recipient.username.clone(),
                email: recipient.email.clone(),
                result,
            });
        }

        if report.attempted() > 0 {
            info!(
                "Dispatched {}: {} of {} delivered",
                report.kind,
                report.delivered(),
                report.attempted()
            );
        }

        report
    }

    /// Send the event to every recipient, discarding per-recipient results
    pub async fn notify(
        &self,
        event: &NotificationEvent,
        recipients: &[AdminRecipient],
    ) -> AppResult<()> {
        self.dispatch(event, recipients).await;
        Ok(())
    }

    async fn send(&self, event: &NotificationEvent, recipient: &AdminRecipient) -> AppResult<()> {
        let (email, locale) = (recipient.email.as_str(), recipient.locale.as_str());

        match event {
            NotificationEvent::AtLimitWarning { site_url } => {
                self.email
                    .send_at_user_limit_warning(email, locale, site_url)
                    .await
            }
            NotificationEvent::OverLimitWarning { site_url } => {
                self.email
                    .send_over_user_limit_warning(email, locale, site_url)
                    .await
            }
            NotificationEvent::PaymentFailed { site_url, details } => {
                self.email
                    .send_payment_failed(email, locale, details, site_url)
                    .await
            }
            NotificationEvent::NoCardPaymentFailed { site_url } => {
                self.email
                    .send_no_card_payment_failed(email, locale, site_url)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use seatguard_core::models::FailedPayment;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Records every call; fails for the configured addresses
    #[derive(Default)]
    struct MockEmailService {
        failing: HashSet<String>,
        calls: Mutex<Vec<(NotificationKind, String, String)>>,
    }

    impl MockEmailService {
        fn failing_for(emails: &[&str]) -> Self {
            Self {
                failing: emails.iter().map(|e| e.to_string()).collect(),
                ..Default::default()
            }
        }

        fn record(&self, kind: NotificationKind, email: &str, locale: &str) -> AppResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((kind, email.to_string(), locale.to_string()));
            if self.failing.contains(email) {
                Err(AppError::Transport(format!("rejected {}", email)))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl EmailService for MockEmailService {
        async fn send_at_user_limit_warning(&self, email: &str, locale: &str, _site_url: &str) -> AppResult<()> {
            self.record(NotificationKind::AtLimitWarning, email, locale)
        }

        async fn send_over_user_limit_warning(&self, email: &str, locale: &str, _site_url: &str) -> AppResult<()> {
            self.record(NotificationKind::OverLimitWarning, email, locale)
        }

        async fn send_payment_failed(
            &self,
            email: &str,
            locale: &str,
            _failed_payment: &FailedPayment,
            _site_url: &str,
        ) -> AppResult<()> {
            self.record(NotificationKind::PaymentFailed, email, locale)
        }

        async fn send_no_card_payment_failed(&self, email: &str, locale: &str, _site_url: &str) -> AppResult<()> {
            self.record(NotificationKind::NoCardPaymentFailed, email, locale)
        }
    }

    fn recipients(n: usize) -> Vec<AdminRecipient> {
        (0..n)
            .map(|i| AdminRecipient::new(format!("admin{}@example.com", i), "en", format!("admin{}", i)))
            .collect()
    }

    fn over_limit() -> NotificationEvent {
        NotificationEvent::OverLimitWarning {
            site_url: "https://acme.example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_partial_failure_attempts_everyone() {
        let email = Arc::new(MockEmailService::failing_for(&[
            "admin1@example.com",
            "admin3@example.com",
        ]));
        let notifier = AdminNotifier::new(email.clone());

        let report = notifier.dispatch(&over_limit(), &recipients(5)).await;

        assert_eq!(report.attempted(), 5);
        assert_eq!(report.delivered(), 3);
        let failed: Vec<_> = report.failures().map(|o| o.username.as_str()).collect();
        assert_eq!(failed, vec!["admin1", "admin3"]);
        assert_eq!(email.calls.lock().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_all_failures_still_succeed() {
        let email = Arc::new(MockEmailService::failing_for(&[
            "admin0@example.com",
            "admin1@example.com",
        ]));
        let notifier = AdminNotifier::new(email.clone());

        assert!(notifier.notify(&over_limit(), &recipients(2)).await.is_ok());
        assert_eq!(email.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_recipients_is_silent() {
        let email = Arc::new(MockEmailService::default());
        let notifier = AdminNotifier::new(email.clone());

        let report = notifier.dispatch(&over_limit(), &[]).await;
        assert_eq!(report.attempted(), 0);
        assert_eq!(report.failures().count(), 0);
        assert!(email.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_selects_template_and_locale() {
        let email = Arc::new(MockEmailService::default());
        let notifier = AdminNotifier::new(email.clone());
        let admins = vec![
            AdminRecipient::new("ana@example.com", "es", "ana"),
            AdminRecipient::new("bob@example.com", "en", "bob"),
        ];
        let event = NotificationEvent::NoCardPaymentFailed {
            site_url: "https://acme.example.com".to_string(),
        };

        notifier.notify(&event, &admins).await.unwrap();

        assert_eq!(
            *email.calls.lock().unwrap(),
            vec![
                (NotificationKind::NoCardPaymentFailed, "ana@example.com".to_string(), "es".to_string()),
                (NotificationKind::NoCardPaymentFailed, "bob@example.com".to_string(), "en".to_string()),
            ]
        );
    }
}
