//! Relay handlers - webhook receipt and client-side replay.

mod forward_webhook;
mod receive_webhook;

pub use forward_webhook::ForwardWebhookHandler;
pub use receive_webhook::{ReceiveOutcome, ReceiveWebhookCommand, ReceiveWebhookHandler};
