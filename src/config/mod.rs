//! Configuration system for Relevo.
//!
//! Supports building configuration in code, or loading it from files and
//! environment variables, with validation and sensible defaults.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

pub(crate) use validation::validate_config;

/// Default configuration file names that the loader will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "relevo.toml",
    "relevo.yaml",
    "relevo.yml",
    "relevo.json",
    ".relevo/config.toml",
    ".relevo/config.yaml",
    ".relevo/config.yml",
    ".relevo/config.json",
];

/// Environment variable prefix for Relevo configuration
pub const ENV_PREFIX: &str = "RELEVO_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
