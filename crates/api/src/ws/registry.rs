//! Subscriber registry: the single shared mutable structure in the system.
//!
//! Maps each [`SubscriberId`] to the sender half of its connection's
//! outbound message channel. Entries are added on connect and removed on
//! disconnect; removal of an absent id is a no-op. All access goes through
//! the methods here, behind an internal `RwLock`, so concurrent
//! connection-handling and report-ingestion contexts never observe a torn
//! state.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use taskpulse_core::types::SubscriberId;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Registry of active subscriber connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct Registry {
    connections: RwLock<HashMap<SubscriberId, WsSender>>,
}

impl Registry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a subscriber, silently replacing any previous entry.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn register(&self, id: SubscriberId) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.write().await.insert(id, tx);
        rx
    }

    /// Look up a subscriber's outbound sender.
    ///
    /// Absence is not an error; it just means the client is gone.
    pub async fn lookup(&self, id: SubscriberId) -> Option<WsSender> {
        self.connections.read().await.get(&id).cloned()
    }

    /// Remove a subscriber. Removing an absent id is a no-op.
    pub async fn unregister(&self, id: SubscriberId) {
        self.connections.write().await.remove(&id);
    }

    /// List all currently registered subscriber ids (diagnostic).
    pub async fn subscriber_ids(&self) -> Vec<SubscriberId> {
        self.connections.read().await.keys().copied().collect()
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for sender in conns.values() {
            let _ = sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for sender in conns.values() {
            let _ = sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
