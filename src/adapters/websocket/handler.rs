//! WebSocket upgrade handler for the realtime gateway.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Resolve the session cookie to a user; reject silently when that fails
//! 2. Upgrade to WebSocket and register the connection
//! 3. Pump relay envelopes to the client until disconnect
//! 4. Guarded unregister on close

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::adapters::http::middleware::session_cookie;
use crate::domain::foundation::SessionUser;
use crate::domain::relay::RelayMessage;
use crate::ports::{ConnectionHandle, ConnectionRegistry, SessionAuthenticator};

/// State required for gateway handling.
#[derive(Clone)]
pub struct GatewayState {
    pub authenticator: Arc<dyn SessionAuthenticator>,
    pub registry: Arc<dyn ConnectionRegistry>,
}

impl GatewayState {
    /// Create a new gateway state.
    pub fn new(
        authenticator: Arc<dyn SessionAuthenticator>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            authenticator,
            registry,
        }
    }
}

/// Handle WebSocket upgrade requests for the realtime channel.
///
/// Route: `GET /ws`
///
/// Authentication happens once, here, against the `session_id` cookie on
/// the upgrade request. Every failure mode - missing cookie, unknown or
/// expired session, store failure - is rejected the same way: an empty 401
/// with no error payload.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<GatewayState>,
    headers: HeaderMap,
) -> Response {
    let Some(credential) = session_cookie(&headers) else {
        tracing::debug!("Gateway connection rejected: no session cookie");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let user = match state.authenticator.resolve(&credential).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::debug!("Gateway connection rejected: invalid or expired session");
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Gateway connection rejected: session store failure");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(socket, user, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection: registers the handle, forwards
/// enqueued envelopes as JSON text frames, and on close retires exactly this
/// handle from the registry.
async fn handle_socket(socket: WebSocket, user: SessionUser, state: GatewayState) {
    let (handle, mut outbound) = ConnectionHandle::open();
    state.registry.register(&user.id, handle.clone()).await;

    tracing::info!(
        user_id = %user.id,
        connection_id = %handle.id(),
        "Realtime connection established"
    );

    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(envelope) = outbound.recv().await {
            if send_envelope(&mut sender, &envelope).await.is_err() {
                break;
            }
        }
    });

    // The client sends no application messages; only the disconnect signal
    // matters here.
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    // Guarded removal: if a newer connection already superseded this one,
    // the registry keeps the newer mapping.
    state.registry.unregister(&user.id, &handle).await;

    tracing::info!(
        user_id = %user.id,
        connection_id = %handle.id(),
        "Realtime connection closed"
    );
}

/// Send a relay envelope as a JSON text frame.
async fn send_envelope(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    envelope: &RelayMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(envelope).expect("RelayMessage serialization should not fail");
    sender.send(Message::Text(json)).await
}

/// Create axum router for the gateway endpoint.
pub fn gateway_router() -> axum::Router<GatewayState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}
