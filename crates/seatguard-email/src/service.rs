//! Templated email service
//!
//! Renders the notification for the recipient's locale and hands the result
//! to a `MailTransport`.

use async_trait::async_trait;
use seatguard_core::{
    models::{FailedPayment, NotificationKind},
    traits::EmailService,
    AppResult,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::templates::{billing_url, TemplateRegistry};
use crate::transport::{MailTransport, OutgoingEmail};

/// Template data shared by every notification
#[derive(Debug, Serialize)]
struct TemplateData<'a> {
    site_url: &'a str,
    billing_url: String,
    details: Option<&'a FailedPayment>,
    retry_date: Option<String>,
}

impl<'a> TemplateData<'a> {
    fn new(site_url: &'a str) -> Self {
        Self {
            site_url,
            billing_url: billing_url(site_url),
            details: None,
            retry_date: None,
        }
    }

    fn with_failed_payment(mut self, failed_payment: &'a FailedPayment) -> Self {
        self.retry_date = failed_payment
            .next_retry_at
            .map(|at| at.format("%Y-%m-%d").to_string());
        self.details = Some(failed_payment);
        self
    }
}

/// `EmailService` rendering handlebars templates onto a mail transport
pub struct TemplatedEmailService<T: MailTransport> {
    transport: T,
    templates: TemplateRegistry,
    from_address: String,
    from_name: String,
}

impl<T: MailTransport> TemplatedEmailService<T> {
    /// Create a new email service
    ///
    /// # Errors
    ///
    /// Returns `AppError::Template` if the built-in templates fail to register
    pub fn new(
        transport: T,
        from_address: impl Into<String>,
        from_name: impl Into<String>,
        default_locale: &str,
    ) -> AppResult<Self> {
        Ok(Self {
            transport,
            templates: TemplateRegistry::new(default_locale)?,
            from_address: from_address.into(),
            from_name: from_name.into(),
        })
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn deliver(
        &self,
        kind: NotificationKind,
        email: &str,
        locale: &str,
        data: &TemplateData<'_>,
    ) -> AppResult<()> {
        let rendered = self.templates.render(kind, locale, data)?;
        debug!("Sending {} to {} in locale {}", kind, email, rendered.locale);

        let message = OutgoingEmail {
            from_address: self.from_address.clone(),
            from_name: self.from_name.clone(),
            to: email.to_string(),
            subject: rendered.subject,
            html_body: rendered.html_body,
        };

        self.transport.send(&message).await
    }
}

#[async_trait]
impl<T: MailTransport> EmailService for TemplatedEmailService<T> {
    #[instrument(skip(self))]
    async fn send_at_user_limit_warning(
        &self,
        email: &str,
        locale: &str,
        site_url: &str,
    ) -> AppResult<()> {
        let data = TemplateData::new(site_url);
        self.deliver(NotificationKind::AtLimitWarning, email, locale, &data)
            .await
    }

    #[instrument(skip(self))]
    async fn send_over_user_limit_warning(
        &self,
        email: &str,
        locale: &str,
        site_url: &str,
    ) -> AppResult<()> {
        let data = TemplateData::new(site_url);
        self.deliver(NotificationKind::OverLimitWarning, email, locale, &data)
            .await
    }

    #[instrument(skip(self, failed_payment))]
    async fn send_payment_failed(
        &self,
        email: &str,
        locale: &str,
        failed_payment: &FailedPayment,
        site_url: &str,
    ) -> AppResult<()> {
        let data = TemplateData::new(site_url).with_failed_payment(failed_payment);
        self.deliver(NotificationKind::PaymentFailed, email, locale, &data)
            .await
    }

    #[instrument(skip(self))]
    async fn send_no_card_payment_failed(
        &self,
        email: &str,
        locale: &str,
        site_url: &str,
    ) -> AppResult<()> {
        let data = TemplateData::new(site_url);
        self.deliver(NotificationKind::NoCardPaymentFailed, email, locale, &data)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use seatguard_core::AppError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, message: &OutgoingEmail) -> AppResult<()> {
            if self.fail {
                return Err(AppError::Transport("connection refused".to_string()));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn service(fail: bool) -> TemplatedEmailService<RecordingTransport> {
        let transport = RecordingTransport {
            fail,
            ..Default::default()
        };
        TemplatedEmailService::new(transport, "no-reply@example.com", "Example", "en").unwrap()
    }

    #[tokio::test]
    async fn test_over_limit_sends_localized_message() {
        let service = service(false);
        service
            .send_over_user_limit_warning("ana@example.com", "es", "https://acme.example.com")
            .await
            .unwrap();

        let sent = service.transport().sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ana@example.com");
        assert_eq!(sent[0].from_address, "no-reply@example.com");
        assert!(sent[0].subject.contains("límite"));
        assert!(sent[0]
            .html_body
            .contains("https://acme.example.com/admin_console/billing/subscription"));
    }

    #[tokio::test]
    async fn test_payment_failed_renders_details() {
        let service = service(false);
        let failed = FailedPayment {
            card_brand: Some("Visa".to_string()),
            last_four: Some("4242".to_string()),
            failure_message: "Your card was declined.".to_string(),
            amount: Some(dec!(49.00)),
            currency: Some("USD".to_string()),
            next_retry_at: Some(Utc.with_ymd_and_hms(2026, 11, 2, 0, 0, 0).unwrap()),
        };

        service
            .send_payment_failed("bob@example.com", "en", &failed, "https://acme.example.com")
            .await
            .unwrap();

        let sent = service.transport().sent.lock().unwrap();
        let body = &sent[0].html_body;
        assert!(body.contains("Visa"));
        assert!(body.contains("4242"));
        assert!(body.contains("49.00 USD"));
        assert!(body.contains("Your card was declined."));
        assert!(body.contains("2026-11-02"));
    }

    #[tokio::test]
    async fn test_payment_failed_without_details() {
        let service = service(false);
        service
            .send_payment_failed(
                "bob@example.com",
                "en",
                &FailedPayment::default(),
                "https://acme.example.com",
            )
            .await
            .unwrap();

        let sent = service.transport().sent.lock().unwrap();
        assert!(sent[0].html_body.contains("your card"));
        assert!(!sent[0].html_body.contains("Reason:"));
    }

    #[tokio::test]
    async fn test_transport_error_is_returned() {
        let service = service(true);
        let result = service
            .send_no_card_payment_failed("bob@example.com", "en", "https://acme.example.com")
            .await;
        assert_eq!(
            result,
            Err(AppError::Transport("connection refused".to_string()))
        );
    }
}
