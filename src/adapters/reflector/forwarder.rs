//! Reqwest implementation of WebhookForwarder.
//!
//! Replays a captured webhook against its `http://localhost` target with the
//! captured method, headers, and body. Failures are swallowed: the replay
//! reports `None` and the reflector keeps running.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::domain::relay::WebhookMessage;
use crate::ports::WebhookForwarder;

/// Headers that describe the inbound transport rather than the payload.
/// Replaying them verbatim would corrupt the outbound request, so the
/// forwarder re-derives them.
static TRANSPORT_HEADERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "host",
        "content-length",
        "connection",
        "transfer-encoding",
        "keep-alive",
        "upgrade",
    ])
});

/// Reqwest implementation of WebhookForwarder.
pub struct ReqwestWebhookForwarder {
    client: reqwest::Client,
}

impl ReqwestWebhookForwarder {
    /// Creates a forwarder with the given per-replay timeout.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("HTTP client construction should not fail");
        Self { client }
    }
}

#[async_trait]
impl WebhookForwarder for ReqwestWebhookForwarder {
    async fn forward(&self, message: &WebhookMessage) -> Option<u16> {
        let method = match reqwest::Method::from_bytes(message.method.as_bytes()) {
            Ok(method) => method,
            Err(_) => {
                tracing::warn!(method = %message.method, "Unreplayable method");
                return None;
            }
        };

        let mut request = self.client.request(method, &message.target);

        for (name, value) in &message.headers {
            if !TRANSPORT_HEADERS.contains(name.to_ascii_lowercase().as_str()) {
                request = request.header(name, value);
            }
        }

        if let Some(body) = &message.body {
            if !WebhookMessage::is_bodyless(&message.method) {
                request = request.body(body.clone());
            }
        }

        match request.send().await {
            Ok(response) => Some(response.status().as_u16()),
            Err(e) => {
                tracing::warn!(
                    target = %message.target,
                    error = %e,
                    "Failed to forward webhook"
                );
                None
            }
        }
    }
}
