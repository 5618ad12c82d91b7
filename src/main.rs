//! SeatGuard
//!
//! Runs one user limit check cycle for the configured tenant and exits.
//! Meant to be invoked by an external scheduler (cron, systemd timer, job
//! runner); retries are the scheduler's business.
//!
//! Configuration is read from `SEATGUARD_CONFIG` when set, otherwise from
//! `config/` and `SEATGUARD__*` environment variables.

use anyhow::Context;
use seatguard_core::config::ConfigLicenseProvider;
use seatguard_core::traits::EmailService;
use seatguard_core::{AppConfig, AppError};
use seatguard_db::{create_pool, PgUserStore};
use seatguard_email::{HttpMailTransport, LogMailTransport, TemplatedEmailService};
use seatguard_services::{CloudNotificationService, HttpBillingProvider};
use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "seatguard={},seatguard_services={},seatguard_email={},seatguard_db={},sqlx=warn",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .init();
}

/// Wire the collaborators and run one check cycle
async fn run_cycle<E: EmailService + 'static>(config: &AppConfig, email: Arc<E>) -> anyhow::Result<()> {
    let pool = create_pool(&config.database)
        .await
        .context("connecting to the user database")?;

    let license = Arc::new(ConfigLicenseProvider::from_config(config));
    let billing = Arc::new(
        HttpBillingProvider::from_config(&config.billing).context("building billing client")?,
    );
    let users = Arc::new(PgUserStore::new(pool));

    let service = CloudNotificationService::new(license, billing, users, email)
        .with_admin_page_size(config.notifications.admin_page_size);

    let ctx = service.tenant_context(config.service.tenant_id.clone());
    match service.check_user_limit(&ctx).await? {
        Some(report) => info!(
            "Sent {} to {} of {} administrators",
            report.kind,
            report.delivered(),
            report.attempted()
        ),
        None => info!("No user limit warning due"),
    }

    Ok(())
}

async fn run() -> anyhow::Result<()> {
    let config = match env::var("SEATGUARD_CONFIG") {
        Ok(path) => AppConfig::from_file(&path),
        Err(_) => AppConfig::load(),
    }
    .map_err(AppError::from)
    .context("loading configuration")?;

    let email = &config.email;
    match email.relay_url {
        Some(ref relay_url) => {
            let transport = HttpMailTransport::new(relay_url, email.api_key.clone(), email.timeout_ms)?;
            let service = TemplatedEmailService::new(
                transport,
                email.from_address.clone(),
                email.from_name.clone(),
                &email.default_locale,
            )?;
            run_cycle(&config, Arc::new(service)).await
        }
        None => {
            warn!("No mail relay configured, notification emails will only be logged");
            let service = TemplatedEmailService::new(
                LogMailTransport::new(),
                email.from_address.clone(),
                email.from_name.clone(),
                &email.default_locale,
            )?;
            run_cycle(&config, Arc::new(service)).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting SeatGuard v{}", env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<AppError>()
                .map(AppError::error_code)
                .unwrap_or("internal_error");
            error!(error_code = code, "User limit check failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
