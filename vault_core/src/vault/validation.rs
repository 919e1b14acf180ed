use std::path::{Component, Path};
use thiserror::Error;

use super::metadata::SIDECAR_SUFFIX;

const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Filename too long: {length} bytes (max: {max_length})")]
    FilenameTooLong { length: usize, max_length: usize },

    #[error("Invalid filename: {filename}")]
    InvalidFilename { filename: String },

    #[error("Reserved filename: {filename}")]
    ReservedFilename { filename: String },

    #[error("Filename collides with the metadata sidecar namespace: {filename}")]
    SidecarFilename { filename: String },

    #[error("Invalid folder path: {path} ({reason})")]
    InvalidFolder { path: String, reason: &'static str },
}

#[derive(Debug, Clone)]
pub struct NameValidationConfig {
    pub max_filename_length: usize,
    pub max_folder_depth: usize,
}

impl Default for NameValidationConfig {
    fn default() -> Self {
        Self {
            max_filename_length: 255,
            max_folder_depth: 2,
        }
    }
}

/// Guards every caller-supplied folder path and file name before it is joined
/// onto the vault root.
#[derive(Debug, Clone)]
pub struct NameValidator {
    config: NameValidationConfig,
}

impl NameValidator {
    pub fn new(config: NameValidationConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(NameValidationConfig::default())
    }

    pub fn validate_folder(&self, folder: &str) -> Result<(), ValidationError> {
        let invalid = |reason| ValidationError::InvalidFolder {
            path: folder.to_string(),
            reason,
        };

        if folder.trim().is_empty() {
            return Err(invalid("empty path"));
        }

        if folder.contains('\0') || folder.contains('\\') {
            return Err(invalid("illegal character"));
        }

        let mut depth = 0;
        for component in Path::new(folder).components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::ParentDir => return Err(invalid("parent directory reference")),
                Component::CurDir => return Err(invalid("current directory reference")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("absolute path"))
                }
            }
        }

        // `Path::components` silently folds "a/./b" and "a//b"
        if folder.split('/').any(|segment| segment.is_empty() || segment == ".") {
            return Err(invalid("empty or dot segment"));
        }

        if depth > self.config.max_folder_depth {
            return Err(invalid("nested too deeply"));
        }

        Ok(())
    }

    pub fn validate_filename(&self, filename: &str) -> Result<(), ValidationError> {
        if filename.len() > self.config.max_filename_length {
            return Err(ValidationError::FilenameTooLong {
                length: filename.len(),
                max_length: self.config.max_filename_length,
            });
        }

        if filename.trim().is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('\0')
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(ValidationError::InvalidFilename {
                filename: filename.to_string(),
            });
        }

        let stem = filename.split('.').next().unwrap_or(filename).to_uppercase();
        if RESERVED_NAMES.contains(&stem.as_str()) {
            return Err(ValidationError::ReservedFilename {
                filename: filename.to_string(),
            });
        }

        Ok(())
    }

    /// Stricter check for names of newly stored files: on top of
    /// [`validate_filename`](Self::validate_filename) the name may not look like
    /// a sidecar, otherwise it would shadow another file's metadata.
    pub fn validate_upload_name(&self, filename: &str) -> Result<(), ValidationError> {
        self.validate_filename(filename)?;

        if filename.to_ascii_lowercase().ends_with(SIDECAR_SUFFIX) {
            return Err(ValidationError::SidecarFilename {
                filename: filename.to_string(),
            });
        }

        Ok(())
    }
}
