use axum::{
    extract::{Multipart, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, Result, VaultResult},
    models::{
        ApiResponse, FileDeleteResponse, FileListResponse, FileLocator, FileMetadataResponse,
        FileUploadResponse, FolderQuery, UploadQuery, VaultSearchQuery, VaultSearchResponse,
    },
    vault::{MetadataRecord, UploadForm},
    AppState,
};

/// Store calls block on the filesystem, so they run off the async workers.
async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> VaultResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Other(anyhow::anyhow!("store task failed: {e}")))?
        .map_err(AppError::from)
}

fn non_empty(query: Option<String>) -> Option<String> {
    query.filter(|q| !q.is_empty())
}

pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<FolderQuery>,
) -> Result<Json<ApiResponse<FileListResponse>>> {
    let FolderQuery { folder, q } = query;
    let q = non_empty(q);
    info!("GET /api/files - folder: {}, query: {:?}", folder, q);

    let vault = state.vault.clone();
    let (task_folder, task_query) = (folder.clone(), q.clone());
    // browsing lists raw entries; an actual query goes through metadata search
    let files = blocking(move || match task_query.as_deref() {
        Some(needle) => vault.search_files(&task_folder, Some(needle)),
        None => vault.list_files(&task_folder, None),
    })
    .await?;

    Ok(Json(ApiResponse::success(FileListResponse {
        total: files.len(),
        folder,
        query: q,
        files,
    })))
}

pub async fn upload_file(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileUploadResponse>>)> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let filename = field
                .file_name()
                .ok_or_else(|| AppError::BadRequest("Missing filename".to_string()))?
                .to_string();

            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            upload = Some((filename, data.to_vec()));
            continue;
        }

        let slot = match name.as_str() {
            "author" => &mut form.author,
            "customer_name" => &mut form.customer_name,
            "project_name" => &mut form.project_name,
            "owner" => &mut form.owner,
            "tags" => &mut form.tags,
            _ => continue,
        };
        *slot = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field {}: {}", name, e))
        })?;
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::BadRequest("No file found in request".to_string()))?;
    info!("POST /api/files - folder: {}, file: {}, size: {}", query.folder, filename, data.len());

    let vault = state.vault.clone();
    let folder = query.folder.clone();
    let size = data.len();
    let record = form.into_record();
    let (stored, metadata) = blocking(move || {
        let stored = vault.save_file(&folder, &filename, &data)?;
        vault.save_metadata(&folder, &stored, &record)?;
        Ok((stored, record))
    })
    .await?;

    let response = FileUploadResponse {
        folder: query.folder,
        filename: stored,
        size,
        metadata,
        uploaded_at: chrono::Utc::now().to_rfc3339(),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(response, "Uploaded with metadata")),
    ))
}

pub async fn get_metadata(
    State(state): State<AppState>,
    Query(locator): Query<FileLocator>,
) -> Result<Json<ApiResponse<FileMetadataResponse>>> {
    let vault = state.vault.clone();
    let FileLocator { folder, name } = locator;
    let (task_folder, task_name) = (folder.clone(), name.clone());

    let metadata = blocking(move || vault.get_metadata(&task_folder, &task_name)).await?;

    Ok(Json(ApiResponse::success(FileMetadataResponse {
        folder,
        filename: name,
        metadata,
    })))
}

pub async fn update_metadata(
    State(state): State<AppState>,
    Query(locator): Query<FileLocator>,
    Json(edits): Json<MetadataRecord>,
) -> Result<Json<ApiResponse<FileMetadataResponse>>> {
    info!("PUT /api/files/metadata - folder: {}, file: {}", locator.folder, locator.name);

    let vault = state.vault.clone();
    let FileLocator { folder, name } = locator;
    let (task_folder, task_name) = (folder.clone(), name.clone());

    let metadata =
        blocking(move || vault.update_metadata(&task_folder, &task_name, edits)).await?;

    Ok(Json(ApiResponse::with_message(
        FileMetadataResponse {
            folder,
            filename: name,
            metadata,
        },
        "Metadata updated successfully",
    )))
}

pub async fn download_file(
    State(state): State<AppState>,
    Query(locator): Query<FileLocator>,
) -> Result<impl IntoResponse> {
    let vault = state.vault.clone();
    let FileLocator { folder, name } = locator;
    let task_name = name.clone();

    let data = blocking(move || vault.read_file(&folder, &task_name)).await?;

    let mime = mime_guess::from_path(&name).first_or_octet_stream();
    let content_type = HeaderValue::from_str(mime.as_ref())
        .map_err(|e| AppError::Other(anyhow::anyhow!("invalid content type: {e}")))?;

    let disposition = format!("attachment; filename=\"{}\"", name.replace('"', "\\\""));
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|_| AppError::BadRequest("Filename cannot be sent as a header".to_string()))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    ))
}

pub async fn delete_file(
    State(state): State<AppState>,
    Query(locator): Query<FileLocator>,
) -> Result<Json<ApiResponse<FileDeleteResponse>>> {
    info!("DELETE /api/files - folder: {}, file: {}", locator.folder, locator.name);

    let vault = state.vault.clone();
    let FileLocator { folder, name } = locator;
    let (task_folder, task_name) = (folder.clone(), name.clone());

    let outcome = blocking(move || vault.delete_file(&task_folder, &task_name)).await?;

    Ok(Json(ApiResponse::success(FileDeleteResponse {
        folder,
        filename: name,
        outcome,
    })))
}

pub async fn search_vault(
    State(state): State<AppState>,
    Query(query): Query<VaultSearchQuery>,
) -> Result<Json<ApiResponse<VaultSearchResponse>>> {
    let q = non_empty(query.q)
        .ok_or_else(|| AppError::BadRequest("Search query is required".to_string()))?;
    info!("GET /api/search - query: {}", q);

    let vault = state.vault.clone();
    let catalog = state.catalog.clone();
    let task_query = q.clone();

    let results = blocking(move || {
        Ok(vault.search_vault(catalog.folders(), Some(task_query.as_str())))
    })
    .await?;

    Ok(Json(ApiResponse::success(VaultSearchResponse {
        query: q,
        total: results.iter().map(|hits| hits.files.len()).sum(),
        results,
    })))
}
