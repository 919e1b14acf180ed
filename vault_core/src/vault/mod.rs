pub mod catalog;
pub mod metadata;
pub mod store;
pub mod validation;

pub use catalog::{default_folders, Catalog, Category};
pub use metadata::{parse_tags, FileStats, MetadataRecord, UploadForm};
pub use store::{DeleteOutcome, FileVault, FileVaultConfig, FolderHits, ProvisionReport, Removal};
pub use validation::{NameValidationConfig, NameValidator, ValidationError};
