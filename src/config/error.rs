//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid connection pool size")]
    InvalidPoolSize,

    #[error("Invalid public origin (must be an absolute http(s) URL without trailing slash)")]
    InvalidPublicOrigin,

    #[error("Invalid server URL (must be ws:// or wss://)")]
    InvalidServerUrl,

    #[error("Invalid reconnect delay")]
    InvalidReconnectDelay,
}
