//! `careopsd` entry point.

use std::sync::Arc;

use careops_adapter_email_http::{EmailError, HttpEmailSender, LogEmailSender, Mailer, Settings};
use careops_adapter_http_axum::router;
use careops_app::realtime_bus::RealtimeBus;
use careopsd::config::{Config, EmailConfig};
use careopsd::wiring::build_state;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = careops_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;

    // Realtime + email
    let realtime = Arc::new(RealtimeBus::new(config.realtime.capacity));
    let mailer = mailer(&config.email)?;

    // HTTP
    let state = build_state(&db, mailer, realtime);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("careopsd listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn mailer(config: &EmailConfig) -> Result<Mailer, EmailError> {
    let Some(api_key) = &config.api_key else {
        tracing::warn!("no email API key configured, emails will only be logged");
        return Ok(Mailer::Log(LogEmailSender));
    };
    let sender = HttpEmailSender::new(Settings {
        api_url: config.api_url.clone(),
        api_key: api_key.clone(),
        default_from: config.from.clone(),
        timeout: config.timeout(),
    })?;
    Ok(Mailer::Http(sender))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
