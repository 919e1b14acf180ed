use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::vault::{default_folders, FileVaultConfig, NameValidationConfig, NameValidator};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub vault: VaultConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_size_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    pub root: PathBuf,
    /// Category folders provisioned at startup, in search order.
    pub folders: Vec<String>,
    pub max_filename_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub permissive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// "pretty" or "json"
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            vault: VaultConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_upload_size_mb: 50,
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("uploaded_documents"),
            folders: default_folders(),
            max_filename_length: 255,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
                "http://localhost:8501".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://127.0.0.1:8501".to_string(),
            ],
            permissive: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(File::with_name("config"));
        }

        builder = builder.add_source(
            Environment::with_prefix("VAULT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("vault.folders")
                .with_list_parse_key("cors.allowed_origins"),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.server.max_upload_size_mb == 0 {
            return Err(ConfigError::Message(
                "Max upload size must be greater than 0".to_string(),
            ));
        }

        if self.vault.root.as_os_str().is_empty() {
            return Err(ConfigError::Message(
                "Vault root cannot be empty".to_string(),
            ));
        }

        if self.vault.folders.is_empty() {
            return Err(ConfigError::Message(
                "At least one vault folder must be configured".to_string(),
            ));
        }

        if self.vault.max_filename_length == 0 {
            return Err(ConfigError::Message(
                "Max filename length must be greater than 0".to_string(),
            ));
        }

        let validator = NameValidator::new(self.name_validation());
        for folder in &self.vault.folders {
            validator
                .validate_folder(folder)
                .map_err(|e| ConfigError::Message(format!("Invalid vault folder: {e}")))?;
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Message(format!(
                "Unknown log format: {}",
                self.logging.format
            )));
        }

        Ok(())
    }

    pub fn name_validation(&self) -> NameValidationConfig {
        NameValidationConfig {
            max_filename_length: self.vault.max_filename_length,
            ..Default::default()
        }
    }

    pub fn file_vault(&self) -> FileVaultConfig {
        FileVaultConfig {
            root: self.vault.root.clone(),
            validation: self.name_validation(),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        (self.server.max_upload_size_mb as usize).saturating_mul(1024 * 1024)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
