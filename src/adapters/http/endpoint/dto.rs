//! HTTP DTOs for endpoint management.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;
use crate::domain::endpoint::Endpoint;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to register a new endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEndpointRequest {
    pub target: String,
    pub method: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// An endpoint as returned by the management API.
///
/// `url` is the public hook URL external callers should be given.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointResponse {
    pub id: String,
    pub target: String,
    pub method: String,
    pub url: String,
    pub created_at: String,
}

impl EndpointResponse {
    /// Builds the response for an endpoint under the configured public origin.
    pub fn from_endpoint(endpoint: &Endpoint, relay: &RelayConfig) -> Self {
        Self {
            id: endpoint.id().to_string(),
            target: endpoint.target().as_str().to_string(),
            method: endpoint.method().as_str().to_string(),
            url: relay.hook_url(&endpoint.id().to_string()),
            created_at: endpoint.created_at().to_rfc3339(),
        }
    }
}

/// Error body for the management API.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "VALIDATION_FAILED")
    }

    pub fn not_found() -> Self {
        Self::new("Endpoint not found", "ENDPOINT_NOT_FOUND")
    }

    pub fn internal() -> Self {
        Self::new("Internal error", "INTERNAL_ERROR")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn endpoint_response_renders_public_url() {
        let endpoint = Endpoint::new(
            UserId::new("user-1").unwrap(),
            "http://localhost:9000/cb",
            "post",
        )
        .unwrap();

        let relay = RelayConfig {
            public_origin: "https://hooks.example.com".to_string(),
        };
        let response = EndpointResponse::from_endpoint(&endpoint, &relay);

        assert_eq!(
            response.url,
            format!("https://hooks.example.com/hook/{}", endpoint.id())
        );
        assert_eq!(response.method, "POST");
        assert_eq!(response.target, "http://localhost:9000/cb");
    }

    #[test]
    fn create_request_deserializes() {
        let json = r#"{"target": "http://localhost:3000/hook", "method": "POST"}"#;
        let req: CreateEndpointRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target, "http://localhost:3000/hook");
        assert_eq!(req.method, "POST");
    }
}
