//! ReceiveWebhookHandler - Turns an inbound hook call into a delivery.
//!
//! The receiver's contract with the external caller is "accepted for
//! best-effort delivery", never "delivered": whatever happens here, the HTTP
//! surface answers 204. Unknown ids are indistinguishable from known ones so
//! response codes cannot be used to probe which ids exist.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::EndpointId;
use crate::domain::relay::{RelayMessage, WebhookMessage};
use crate::ports::{ConnectionRegistry, EndpointStore};

/// One inbound call on the public hook surface.
#[derive(Debug, Clone)]
pub struct ReceiveWebhookCommand {
    /// Raw id path segment; anything unparseable counts as unknown.
    pub endpoint_id: String,
    /// Inbound HTTP verb as received.
    pub method: String,
    /// All request headers, first value per name, names as received.
    pub headers: HashMap<String, String>,
    /// Request body as text, when the transport provided one.
    pub body: Option<String>,
}

/// What became of an inbound call. Internal observability only; the HTTP
/// response never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Message enqueued on the owner's live connection.
    Enqueued,
    /// No endpoint with that id.
    UnknownEndpoint,
    /// Endpoint exists but its owner has no live connection.
    OwnerOffline,
    /// Owner looked connected but the transport refused the enqueue.
    EnqueueFailed,
}

/// Handler for the public webhook receiver.
pub struct ReceiveWebhookHandler {
    store: Arc<dyn EndpointStore>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl ReceiveWebhookHandler {
    pub fn new(store: Arc<dyn EndpointStore>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { store, registry }
    }

    pub async fn handle(&self, cmd: ReceiveWebhookCommand) -> ReceiveOutcome {
        // 1. Resolve the id. Parse failures, lookup misses, and store errors
        //    all collapse into "unknown endpoint".
        let endpoint = match cmd.endpoint_id.parse::<EndpointId>() {
            Ok(id) => match self.store.get_by_id(id).await {
                Ok(Some(endpoint)) => endpoint,
                Ok(None) => {
                    tracing::debug!(endpoint_id = %cmd.endpoint_id, "Hook call for unknown endpoint");
                    return ReceiveOutcome::UnknownEndpoint;
                }
                Err(e) => {
                    tracing::warn!(endpoint_id = %cmd.endpoint_id, error = %e, "Endpoint lookup failed");
                    return ReceiveOutcome::UnknownEndpoint;
                }
            },
            Err(_) => {
                tracing::debug!(endpoint_id = %cmd.endpoint_id, "Hook call with unparseable id");
                return ReceiveOutcome::UnknownEndpoint;
            }
        };

        // 2. No queue, no retry: an offline owner loses the call.
        if !self.registry.is_connected(endpoint.owner_id()).await {
            tracing::debug!(
                endpoint_id = %endpoint.id(),
                owner_id = %endpoint.owner_id(),
                "Dropping webhook, owner not connected"
            );
            return ReceiveOutcome::OwnerOffline;
        }

        // 3. Capture the call with the *inbound* verb, not the registered one.
        let message = WebhookMessage::capture(&endpoint, &cmd.method, cmd.headers, cmd.body);

        // 4. Fire and forget.
        let owner_id = endpoint.owner_id().clone();
        if self
            .registry
            .send(&owner_id, RelayMessage::Webhook(message))
            .await
        {
            tracing::debug!(endpoint_id = %endpoint.id(), "Webhook enqueued for delivery");
            ReceiveOutcome::Enqueued
        } else {
            tracing::warn!(
                endpoint_id = %endpoint.id(),
                owner_id = %owner_id,
                "Webhook enqueue failed after connectivity check"
            );
            ReceiveOutcome::EnqueueFailed
        }
    }
}
