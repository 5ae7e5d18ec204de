//! WebSocket client loop for the reflector.
//!
//! Connects to the relay gateway with the session credential as a cookie,
//! decodes relay envelopes, and hands them to the forward handler. On any
//! disconnect the loop waits a fixed delay and reconnects, indefinitely -
//! the reflector is meant to be left running while the developer works.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::COOKIE;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;

use crate::application::handlers::relay::ForwardWebhookHandler;
use crate::domain::relay::RelayMessage;

/// Errors on the reflector's connection path.
#[derive(Debug, Error)]
pub enum ReflectorError {
    /// The gateway URL could not be turned into a handshake request.
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// The session credential is not usable as a cookie value.
    #[error("Invalid session credential")]
    InvalidCredential,

    /// The WebSocket connection failed or dropped.
    #[error("Gateway connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Long-running reflector client.
pub struct ReflectorClient {
    server_url: String,
    session_credential: String,
    handler: Arc<ForwardWebhookHandler>,
    reconnect_delay: Duration,
}

impl ReflectorClient {
    pub fn new(
        server_url: impl Into<String>,
        session_credential: impl Into<String>,
        handler: Arc<ForwardWebhookHandler>,
        reconnect_delay: Duration,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            session_credential: session_credential.into(),
            handler,
            reconnect_delay,
        }
    }

    /// Runs the connect-receive-replay loop forever.
    ///
    /// A rejected handshake (for example an expired session) is logged and
    /// retried like any other disconnect; the operator fixes the credential
    /// and the next attempt picks it up via a restart.
    pub async fn run(&self) {
        loop {
            match self.run_once().await {
                Ok(()) => {
                    tracing::info!("Gateway connection closed, reconnecting");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Gateway connection failed, reconnecting");
                }
            }
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    /// One connection lifetime: handshake, then replay every envelope until
    /// the socket closes.
    async fn run_once(&self) -> Result<(), ReflectorError> {
        let mut request = self
            .server_url
            .as_str()
            .into_client_request()
            .map_err(|e| ReflectorError::InvalidUrl(e.to_string()))?;

        let cookie = format!("session_id={}", self.session_credential);
        request.headers_mut().insert(
            COOKIE,
            HeaderValue::from_str(&cookie).map_err(|_| ReflectorError::InvalidCredential)?,
        );

        let (socket, _) = connect_async(request).await?;
        tracing::info!(url = %self.server_url, "Connected to relay gateway");

        let (_, mut stream) = socket.split();

        while let Some(frame) = stream.next().await {
            match frame? {
                Message::Text(text) => match serde_json::from_str::<RelayMessage>(&text) {
                    Ok(envelope) => {
                        // Replay failures are already absorbed downstream;
                        // one bad webhook must not end the connection.
                        self.handler.handle(envelope).await;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Dropping undecodable frame");
                    }
                },
                Message::Close(_) => break,
                _ => {}
            }
        }

        Ok(())
    }
}
