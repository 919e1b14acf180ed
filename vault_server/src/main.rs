//! Main entry point for the document vault server binary

use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vault_core::{create_app_with_config, run_server, AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_tracing(&config);

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Vault root: {}", config.vault.root.display());

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let state = AppState::from_config(&config);

    let report = state.provision();
    if !report.is_complete() {
        for (folder, e) in &report.failed {
            warn!("Folder {} could not be provisioned: {}", folder, e);
        }
    }
    info!(
        "Folder structure ready: {} created, {} already present",
        report.created.len(),
        report.existing.len()
    );

    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app_with_config(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={level},vault_core={level},tower_http={level}",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                level = default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(config.logging.format == "json");

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
