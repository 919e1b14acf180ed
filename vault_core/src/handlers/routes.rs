//! Route table and service-level handlers

use crate::{handlers::files, models::ApiResponse, AppState};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::warn;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/folders", get(handle_folders))
        .route("/api/search", get(files::search_vault))
        .route(
            "/api/files",
            get(files::list_files)
                .post(files::upload_file)
                .delete(files::delete_file),
        )
        .route(
            "/api/files/metadata",
            get(files::get_metadata).put(files::update_metadata),
        )
        .route("/api/files/download", get(files::download_file))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "message": "Document vault API",
        "endpoints": {
            "health": "/health",
            "folders": "/api/folders",
            "files": "/api/files?folder={folder}&q={query}",
            "metadata": "/api/files/metadata?folder={folder}&name={name}",
            "download": "/api/files/download?folder={folder}&name={name}",
            "search": "/api/search?q={query}"
        }
    })))
}

async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let root = state.vault.root().to_path_buf();

    let mut missing_folders = Vec::new();
    for folder in state.catalog.folders() {
        let present = tokio::fs::metadata(root.join(folder))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !present {
            missing_folders.push(folder.to_string());
        }
    }

    let healthy = missing_folders.is_empty();
    if !healthy {
        warn!("Vault is missing folders: {:?}", missing_folders);
    }

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "timestamp": chrono::Utc::now().timestamp(),
        "root": root.display().to_string(),
        "missing_folders": missing_folders,
        "version": state.version,
    });

    if healthy {
        (StatusCode::OK, Json(ApiResponse::success(body)))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure(body, "Vault folders are missing")),
        )
    }
}

async fn handle_folders(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "folders": state.catalog.categories(),
        "total": state.catalog.len(),
    })))
}
