//! Reflector configuration
//!
//! The reflector binary runs next to the developer's local environment, not
//! inside the server process, so it loads its own small configuration with
//! the `HOOK_RELAY_REFLECTOR` prefix.

use serde::Deserialize;
use std::time::Duration;

use super::error::{ConfigError, ValidationError};

/// Reflector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReflectorConfig {
    /// WebSocket URL of the relay gateway
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Opaque session credential presented at the handshake
    pub session_credential: String,

    /// Delay between reconnect attempts, in seconds
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,

    /// Timeout for a single webhook replay against the local target, in seconds
    #[serde(default = "default_forward_timeout")]
    pub forward_timeout_secs: u64,
}

impl ReflectorConfig {
    /// Load configuration from `HOOK_RELAY_REFLECTOR__`-prefixed environment
    /// variables, reading `.env` first when present.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HOOK_RELAY_REFLECTOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Get the reconnect delay as Duration
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }

    /// Get the forward timeout as Duration
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_secs(self.forward_timeout_secs)
    }

    /// Validate reflector configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.server_url.starts_with("ws://") && !self.server_url.starts_with("wss://") {
            return Err(ValidationError::InvalidServerUrl);
        }
        if self.session_credential.is_empty() {
            return Err(ValidationError::MissingRequired("SESSION_CREDENTIAL"));
        }
        if self.reconnect_delay_secs == 0 {
            return Err(ValidationError::InvalidReconnectDelay);
        }
        Ok(())
    }
}

fn default_server_url() -> String {
    "ws://localhost:8080/ws".to_string()
}

fn default_reconnect_delay() -> u64 {
    3
}

fn default_forward_timeout() -> u64 {
    30
}
