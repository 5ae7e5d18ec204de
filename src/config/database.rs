//! Database configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Database configuration
///
/// The database holds the endpoint and session tables the relay consults;
/// the relay itself never writes relay traffic to it.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Run migrations on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.max_connections > 100 {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}
