//! Email layer for SeatGuard
//!
//! Renders localized notification emails with handlebars and hands them to
//! a mail transport. Implements the `EmailService` trait from seatguard-core.
//!
//! # Components
//!
//! - `TemplateRegistry` - subject and body templates per notification kind and locale
//! - `MailTransport` - delivery seam, with an HTTP relay and a log-only transport
//! - `TemplatedEmailService` - glues the two together behind `EmailService`
//!
//! # Example
//!
//! ```no_run
//! use seatguard_core::traits::EmailService;
//! use seatguard_email::{LogMailTransport, TemplatedEmailService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = TemplatedEmailService::new(
//!         LogMailTransport::new(),
//!         "no-reply@example.com",
//!         "Example",
//!         "en",
//!     )?;
//!
//!     service
//!         .send_at_user_limit_warning("admin@example.com", "es", "https://example.com")
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod service;
pub mod templates;
pub mod transport;

pub use service::TemplatedEmailService;
pub use templates::{RenderedEmail, TemplateRegistry};
pub use transport::{HttpMailTransport, LogMailTransport, MailTransport, OutgoingEmail};
