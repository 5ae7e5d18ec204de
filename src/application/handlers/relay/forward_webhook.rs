//! ForwardWebhookHandler - Replays delivered webhooks on the client side.

use std::sync::Arc;

use crate::domain::relay::RelayMessage;
use crate::ports::WebhookForwarder;

/// Handler the reflector runs for every envelope it receives.
///
/// Failure to reach the local target is already absorbed by the forwarder
/// port; this handler only dispatches on the envelope kind.
pub struct ForwardWebhookHandler {
    forwarder: Arc<dyn WebhookForwarder>,
}

impl ForwardWebhookHandler {
    pub fn new(forwarder: Arc<dyn WebhookForwarder>) -> Self {
        Self { forwarder }
    }

    /// Replays the message, returning the local target's status code when
    /// the replay completed at the transport level.
    pub async fn handle(&self, envelope: RelayMessage) -> Option<u16> {
        match envelope {
            RelayMessage::Webhook(message) => {
                let status = self.forwarder.forward(&message).await;
                match status {
                    Some(code) => tracing::debug!(
                        endpoint_id = %message.endpoint_id,
                        status = code,
                        "Webhook replayed"
                    ),
                    None => tracing::warn!(
                        endpoint_id = %message.endpoint_id,
                        target = %message.target,
                        "Webhook replay failed"
                    ),
                }
                status
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endpoint::Endpoint;
    use crate::domain::foundation::UserId;
    use crate::domain::relay::WebhookMessage;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct RecordingForwarder {
        calls: Mutex<Vec<WebhookMessage>>,
        status: Option<u16>,
    }

    impl RecordingForwarder {
        fn returning(status: Option<u16>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                status,
            }
        }
    }

    #[async_trait]
    impl WebhookForwarder for RecordingForwarder {
        async fn forward(&self, message: &WebhookMessage) -> Option<u16> {
            self.calls.lock().unwrap().push(message.clone());
            self.status
        }
    }

    fn envelope() -> RelayMessage {
        let endpoint = Endpoint::new(
            UserId::new("user-1").unwrap(),
            "http://localhost:9000/cb",
            "POST",
        )
        .unwrap();
        RelayMessage::Webhook(WebhookMessage::capture(
            &endpoint,
            "POST",
            HashMap::new(),
            Some("hello".to_string()),
        ))
    }

    #[tokio::test]
    async fn dispatches_webhook_to_forwarder() {
        let forwarder = Arc::new(RecordingForwarder::returning(Some(200)));
        let handler = ForwardWebhookHandler::new(forwarder.clone());

        let status = handler.handle(envelope()).await;

        assert_eq!(status, Some(200));
        let calls = forwarder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].body.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn swallowed_failure_surfaces_as_none() {
        let forwarder = Arc::new(RecordingForwarder::returning(None));
        let handler = ForwardWebhookHandler::new(forwarder);

        let status = handler.handle(envelope()).await;

        assert_eq!(status, None);
    }
}
