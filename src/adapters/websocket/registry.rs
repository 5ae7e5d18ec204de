//! In-memory connection registry.
//!
//! One instance exists per process, constructed at startup and shared by the
//! gateway and the webhook receiver. The map is the only shared mutable
//! state on the relay path.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::domain::relay::RelayMessage;
use crate::ports::{ConnectionHandle, ConnectionRegistry};

/// Process-local registry mapping each user to at most one live handle.
#[derive(Debug, Default)]
pub struct InMemoryConnectionRegistry {
    connections: RwLock<HashMap<UserId, ConnectionHandle>>,
}

impl InMemoryConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered connections, open or not.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, user_id: &UserId, handle: ConnectionHandle) {
        let superseded = self
            .connections
            .write()
            .await
            .insert(user_id.clone(), handle);

        if superseded.is_some() {
            // Last-writer-wins: the older tab stops receiving deliveries.
            tracing::info!(user_id = %user_id, "Existing connection superseded");
        }
    }

    async fn unregister(&self, user_id: &UserId, handle: &ConnectionHandle) {
        let mut connections = self.connections.write().await;

        // Compare-and-clear: only the handle that owns the mapping may
        // remove it. A close event from a superseded connection arriving
        // after the replacement registered must leave the new mapping alone.
        if connections
            .get(user_id)
            .is_some_and(|stored| stored.id() == handle.id())
        {
            connections.remove(user_id);
        }
    }

    async fn is_connected(&self, user_id: &UserId) -> bool {
        self.connections
            .read()
            .await
            .get(user_id)
            .is_some_and(ConnectionHandle::is_open)
    }

    async fn send(&self, user_id: &UserId, message: RelayMessage) -> bool {
        let connections = self.connections.read().await;
        match connections.get(user_id) {
            Some(handle) if handle.is_open() => handle.enqueue(message),
            _ => false,
        }
    }
}
