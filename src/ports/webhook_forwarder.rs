//! WebhookForwarder port - Replay of captured webhooks.
//!
//! The reflector hands every received `WebhookMessage` to this port, which
//! performs the outbound HTTP request against the endpoint's local target.

use async_trait::async_trait;

use crate::domain::relay::WebhookMessage;

/// Replays a captured webhook against its target.
///
/// # Failure policy
///
/// Transport failure reaching the local target is swallowed: the forwarder
/// logs it and returns `None`. The external caller's response completed long
/// ago, so there is nobody left to propagate the error to, and a single
/// failed replay must never take down the reflector.
#[async_trait]
pub trait WebhookForwarder: Send + Sync {
    /// Performs the replay, returning the target's status code when the
    /// request completed at the transport level.
    async fn forward(&self, message: &WebhookMessage) -> Option<u16>;
}
