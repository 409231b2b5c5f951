//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &RelevoConfig) -> Result<(), ConfigError> {
    config
        .encoder
        .validate()
        .map_err(ConfigError::ValidationError)?;
    config
        .feed
        .validate()
        .map_err(ConfigError::ValidationError)?;
    config
        .trending
        .validate()
        .map_err(ConfigError::ValidationError)?;
    Ok(())
}
