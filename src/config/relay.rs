//! Relay configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Relay configuration
///
/// Server-side settings of the relay surface itself.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Public origin under which `/hook/{id}` URLs are reachable
    #[serde(default = "default_public_origin")]
    pub public_origin: String,
}

impl RelayConfig {
    /// Render the public URL for a hook endpoint id
    pub fn hook_url(&self, endpoint_id: &str) -> String {
        format!("{}/hook/{}", self.public_origin, endpoint_id)
    }

    /// Validate relay configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let origin_ok = (self.public_origin.starts_with("http://")
            || self.public_origin.starts_with("https://"))
            && !self.public_origin.ends_with('/');
        if !origin_ok {
            return Err(ValidationError::InvalidPublicOrigin);
        }
        Ok(())
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            public_origin: default_public_origin(),
        }
    }
}

fn default_public_origin() -> String {
    "http://localhost:8080".to_string()
}
