//! Core library for the document vault: the metadata-augmented file store and
//! the HTTP routes that expose it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod vault;

pub use config::AppConfig;
pub use error::{AppError, Result, VaultError, VaultResult};
pub use handlers::routes::create_routes;
pub use middleware::cors::{cors_layer, cors_layer_from_config, cors_layer_permissive};
pub use middleware::logging::logging_layer;
pub use vault::{
    Catalog, DeleteOutcome, FileVault, FileVaultConfig, FolderHits, MetadataRecord,
    ProvisionReport, Removal, UploadForm,
};

use axum::{extract::DefaultBodyLimit, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub vault: FileVault,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(vault: FileVault, catalog: Catalog) -> Self {
        Self {
            app_name: "Document Vault".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            vault,
            catalog: Arc::new(catalog),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            FileVault::new(config.file_vault()),
            Catalog::from_folders(config.vault.folders.iter().cloned()),
        )
    }

    /// Creates every catalog folder under the vault root.
    pub fn provision(&self) -> ProvisionReport {
        self.vault.provision_folders(self.catalog.folders())
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    create_routes()
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()))
        .layer(cors_layer_from_config(&config.cors))
        .layer(logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
