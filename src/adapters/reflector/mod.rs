//! Reflector adapters - client-side replay of delivered webhooks.

mod client;
mod forwarder;

pub use client::{ReflectorClient, ReflectorError};
pub use forwarder::ReqwestWebhookForwarder;
