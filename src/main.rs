use anyhow::Context;
use api_server::AppState;
use application::DonorApp;
use config::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "blood_connect=info,api_server=info,domain=info,infrastructure=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Starting Blood Connect donor registry");

    let config = Config::from_env(None).context("Invalid configuration")?;
    info!("Using database: {}", config.database_path);
    info!("API server will bind to: {}", config.bind_address());
    if config.admin_key.is_none() {
        warn!("ADMIN_KEY is not set; admin endpoints will reject every request");
    }

    let donor_app = DonorApp::new(&config).context("Failed to initialise the donor registry")?;
    let state = AppState::new(donor_app, config.environment.clone());

    api_server::serve(state, &config.bind_address(), shutdown_signal()).await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
