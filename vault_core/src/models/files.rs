//! File-related request and response models

use serde::{Deserialize, Serialize};

use crate::vault::{DeleteOutcome, FolderHits, MetadataRecord};

/// Addresses a category folder. Folder paths contain `/`, so they travel as
/// query parameters rather than path segments.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderQuery {
    pub folder: String,
    pub q: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadQuery {
    pub folder: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileLocator {
    pub folder: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaultSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub folder: String,
    pub query: Option<String>,
    pub files: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct FileUploadResponse {
    pub folder: String,
    pub filename: String,
    pub size: usize,
    pub metadata: MetadataRecord,
    pub uploaded_at: String,
}

#[derive(Debug, Serialize)]
pub struct FileMetadataResponse {
    pub folder: String,
    pub filename: String,
    pub metadata: MetadataRecord,
}

#[derive(Debug, Serialize)]
pub struct FileDeleteResponse {
    pub folder: String,
    pub filename: String,
    #[serde(flatten)]
    pub outcome: DeleteOutcome,
}

#[derive(Debug, Serialize)]
pub struct VaultSearchResponse {
    pub query: String,
    pub results: Vec<FolderHits>,
    pub total: usize,
}
