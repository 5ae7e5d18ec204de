//! ConnectionRegistry port - Interface for live-connection tracking.
//!
//! The registry maps a user identity to at most one live transport handle.
//! It is the single shared mutable resource of the relay: every inbound
//! webhook call and every connection lifecycle event goes through it.
//!
//! # Contract
//!
//! - `register` overwrites any existing mapping for the user (last-writer-
//!   wins; the registry never multiplexes to several tabs).
//! - `unregister` removes the mapping **only if** the stored handle is the
//!   one being retired. A delayed close event from a superseded connection
//!   must never evict a newer, still-live connection for the same user.
//! - `send` is fire-and-forget: it reports whether the message was enqueued
//!   on the transport, never whether the client processed it.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::foundation::{ConnectionId, Timestamp, UserId};
use crate::domain::relay::RelayMessage;

/// Enqueue side of one live transport.
///
/// The handle owns the sending half of an unbounded channel; the receiving
/// half is pumped into the WebSocket by the gateway. A handle's identity is
/// its `ConnectionId`, which the guarded unregister compares against.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: mpsc::UnboundedSender<RelayMessage>,
    connected_at: Timestamp,
}

impl ConnectionHandle {
    /// Creates a handle and the transport receiver it feeds.
    pub fn open() -> (Self, mpsc::UnboundedReceiver<RelayMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = Self {
            id: ConnectionId::new(),
            sender,
            connected_at: Timestamp::now(),
        };
        (handle, receiver)
    }

    /// The handle's identity for guarded removal.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// When the connection was established.
    pub fn connected_at(&self) -> Timestamp {
        self.connected_at
    }

    /// Whether the transport can still accept messages.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    /// Enqueues a message on the transport.
    ///
    /// Returns the synchronous enqueue result; never waits for the client.
    pub fn enqueue(&self, message: RelayMessage) -> bool {
        self.sender.send(message).is_ok()
    }
}

/// Port for tracking live connections by user.
///
/// Implementations must make each operation atomic with respect to
/// concurrent calls for the same user.
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Binds a user to a transport handle, superseding any existing one.
    async fn register(&self, user_id: &UserId, handle: ConnectionHandle);

    /// Removes the mapping only if `handle` is the one currently stored.
    async fn unregister(&self, user_id: &UserId, handle: &ConnectionHandle);

    /// Whether the user has a live, still-open connection.
    async fn is_connected(&self, user_id: &UserId) -> bool;

    /// Enqueues a message for the user's connection.
    ///
    /// Returns `false` when no connection exists or the transport reports
    /// itself closed; otherwise the enqueue result.
    async fn send(&self, user_id: &UserId, message: RelayMessage) -> bool;
}
