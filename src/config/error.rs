//! Configuration error types

use thiserror::Error;

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from semantic validation of loaded configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Server port must be non-zero")]
    InvalidPort,

    #[error("Timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Missing required configuration: {0}")]
    MissingRequired(&'static str),
}
