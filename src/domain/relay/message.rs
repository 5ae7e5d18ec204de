//! Relay message types for server-to-client delivery.
//!
//! A `WebhookMessage` is created at receipt time, pushed to the owner's live
//! connection, consumed once by the reflector, and never stored. The envelope
//! is a closed enumeration of message kinds so further kinds can be added
//! without weakening the receiver's type discipline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::endpoint::Endpoint;
use crate::domain::foundation::EndpointId;

/// One captured webhook call, ready for replay.
///
/// `method` is the verb of the *inbound* call, which may differ from the
/// endpoint's registered method since the public receiver accepts every
/// allowed verb. `body` is always absent for GET and HEAD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookMessage {
    pub endpoint_id: EndpointId,
    pub target: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl WebhookMessage {
    /// Captures an inbound call against an endpoint.
    ///
    /// The body is discarded for GET and HEAD regardless of what the
    /// transport provided.
    pub fn capture(
        endpoint: &Endpoint,
        method: &str,
        headers: HashMap<String, String>,
        body: Option<String>,
    ) -> Self {
        let method = method.to_ascii_uppercase();
        let body = if Self::is_bodyless(&method) { None } else { body };
        Self {
            endpoint_id: endpoint.id(),
            target: endpoint.target().as_str().to_string(),
            method,
            headers,
            body,
        }
    }

    /// True for verbs that never carry a replayable body.
    pub fn is_bodyless(method: &str) -> bool {
        method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("HEAD")
    }
}

/// Tagged envelope for everything the gateway sends to a client.
///
/// Serializes as `{"type":"webhook","data":{...}}`. `webhook` is currently
/// the only kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RelayMessage {
    Webhook(WebhookMessage),
}
