//! Ephemeral relay messages and the server-to-client wire envelope.

mod message;

pub use message::{RelayMessage, WebhookMessage};
