//! hook-relay-reflector binary.
//!
//! Connects to the relay gateway as the authenticated user and replays every
//! delivered webhook against its local target. Runs until interrupted.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hook_relay::adapters::reflector::{ReflectorClient, ReqwestWebhookForwarder};
use hook_relay::application::handlers::relay::ForwardWebhookHandler;
use hook_relay::config::ReflectorConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ReflectorConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let forwarder = Arc::new(ReqwestWebhookForwarder::new(config.forward_timeout()));
    let handler = Arc::new(ForwardWebhookHandler::new(forwarder));
    let client = ReflectorClient::new(
        config.server_url.clone(),
        config.session_credential.clone(),
        handler,
        config.reconnect_delay(),
    );

    tracing::info!(url = %config.server_url, "Reflector starting");
    client.run().await;

    Ok(())
}
