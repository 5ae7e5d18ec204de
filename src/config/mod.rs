//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HOOK_RELAY_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use hook_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod reflector;
mod relay;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use reflector::ReflectorConfig;
pub use relay::RelayConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the hook-relay service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Relay configuration (public origin, reflector behavior)
    #[serde(default)]
    pub relay: RelayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HOOK_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HOOK_RELAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HOOK_RELAY__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HOOK_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.relay.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("HOOK_RELAY__DATABASE__URL", "postgresql://test@localhost/test");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("HOOK_RELAY__DATABASE__URL");
        env::remove_var("HOOK_RELAY__SERVER__PORT");
        env::remove_var("HOOK_RELAY__SERVER__ENVIRONMENT");
        env::remove_var("HOOK_RELAY__RELAY__PUBLIC_ORIGIN");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HOOK_RELAY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_public_origin() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HOOK_RELAY__RELAY__PUBLIC_ORIGIN", "https://hooks.example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.relay.public_origin, "https://hooks.example.com");
    }
}
