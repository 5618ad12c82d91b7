//! Localized email templates
//!
//! Each notification kind registers a subject and an HTML body template for
//! every supported locale under the name `{kind}.{locale}.subject` /
//! `{kind}.{locale}.body`.

mod at_user_limit;
mod over_user_limit;
mod payment_failed;
mod payment_failed_no_card;

use handlebars::Handlebars;
use seatguard_core::{models::NotificationKind, AppError, AppResult};
use serde::Serialize;
use tracing::debug;

/// Locales every template registers
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "es"];

/// Last-resort locale when neither the recipient's nor the default one exists
pub const FALLBACK_LOCALE: &str = "en";

/// Path of the billing page linked from the emails
const BILLING_PATH: &str = "/admin_console/billing/subscription";

/// Template names for a kind and locale: (subject, body)
pub fn template_names(kind: NotificationKind, locale: &str) -> (String, String) {
    let base = format!("{}.{}", kind.template_name(), locale);
    (format!("{}.subject", base), format!("{}.body", base))
}

/// Reduce a locale tag to its language code ("es_ES", "es-MX" -> "es")
pub fn normalize_locale(locale: &str) -> String {
    locale
        .trim()
        .split(|c: char| c == '-' || c == '_')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Link to the subscription page of a site
///
/// Any query string or fragment on the site URL is dropped.
pub fn billing_url(site_url: &str) -> String {
    let base = site_url.split(['?', '#']).next().unwrap_or_default();
    format!("{}{}", base.trim_end_matches('/'), BILLING_PATH)
}

/// A rendered email ready for a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub locale: String,
    pub subject: String,
    pub html_body: String,
}

/// Handlebars registry holding every notification template
pub struct TemplateRegistry {
    registry: Handlebars<'static>,
    default_locale: String,
}

impl TemplateRegistry {
    /// Build the registry with all built-in templates
    ///
    /// # Errors
    ///
    /// Returns `AppError::Template` if a template fails to parse
    pub fn new(default_locale: &str) -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        at_user_limit::register_templates(&mut registry)?;
        over_user_limit::register_templates(&mut registry)?;
        payment_failed::register_templates(&mut registry)?;
        payment_failed_no_card::register_templates(&mut registry)?;

        Ok(Self {
            registry,
            default_locale: normalize_locale(default_locale),
        })
    }

    /// Pick the locale templates will be rendered in
    ///
    /// Tries the recipient's language, then the configured default, then
    /// `FALLBACK_LOCALE`.
    pub fn resolve_locale(&self, kind: NotificationKind, locale: &str) -> String {
        let requested = normalize_locale(locale);
        for candidate in [requested.as_str(), self.default_locale.as_str()] {
            let (subject, body) = template_names(kind, candidate);
            if self.registry.has_template(&subject) && self.registry.has_template(&body) {
                return candidate.to_string();
            }
        }
        FALLBACK_LOCALE.to_string()
    }

    /// Render subject and body for a kind in the recipient's locale
    pub fn render<T: Serialize>(
        &self,
        kind: NotificationKind,
        locale: &str,
        data: &T,
    ) -> AppResult<RenderedEmail> {
        let locale = self.resolve_locale(kind, locale);
        let (subject_name, body_name) = template_names(kind, &locale);
        debug!("Rendering {} in locale {}", kind, locale);

        let subject = self
            .registry
            .render(&subject_name, data)
            .map_err(|e| AppError::Template(format!("{}: {}", subject_name, e)))?;
        let html_body = self
            .registry
            .render(&body_name, data)
            .map_err(|e| AppError::Template(format!("{}: {}", body_name, e)))?;

        Ok(RenderedEmail {
            locale,
            subject: subject.trim().to_string(),
            html_body,
        })
    }
}

/// Register one template, mapping parse failures into `AppError::Template`
fn register(registry: &mut Handlebars<'static>, name: &str, source: &str) -> AppResult<()> {
    registry
        .register_template_string(name, source)
        .map_err(|e| AppError::Template(format!("registering {}: {}", name, e)))
}
