pub mod settings;

pub use settings::{AppConfig, CorsConfig, LoggingConfig, ServerConfig, VaultConfig};
