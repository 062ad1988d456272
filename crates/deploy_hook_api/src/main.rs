//! DeployHook webhook receiver.
//!
//! Binary entry point: validates the configuration, then serves the webhook
//! endpoint until shutdown.
//!
//! # Environment Variables
//!
//! - `IBMCLOUD_API_KEY`: IBM Cloud platform API key (required)
//! - `WEBHOOK_SECRET`: shared GitHub webhook secret (required)
//! - `CE_APP`: Code Engine application name (required)
//! - `CE_REGION`: Code Engine region, e.g. `us-south` (required)
//! - `CE_PROJECT_ID`: Code Engine project GUID (required)
//! - `ICR_NAMESPACE`: Container Registry namespace (required)
//! - `ICR_IMAGE`: Container Registry image name (required)
//! - `API_HOST` / `API_PORT`: bind address (default: 0.0.0.0:8080)
//! - `RUST_LOG`: log filter (default: info)

use anyhow::Context;

use deploy_hook_api::{ApiConfig, ApiServer, AppState};
use deploy_hook_core::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    // All required settings are validated here, before the socket binds;
    // nothing on the request path reads the environment.
    let config = Config::from_env().context("configuration validation failed")?;
    tracing::info!(?config, "Configuration loaded");

    let api_config = ApiConfig::from_env()?;
    let state = AppState::new(config);
    let server = ApiServer::new(api_config, state);

    tracing::info!("Starting DeployHook webhook receiver");
    server.serve().await
}
