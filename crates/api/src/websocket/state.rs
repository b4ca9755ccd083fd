//! Global WebSocket state management
//!
//! Owns the connection registry for this process. Membership changes and their
//! presence announcements happen under one write lock, so every
//! `clients-total` a client sees matches the change that produced it.

use std::sync::Arc;
use tokio::sync::RwLock;

use ipchat_shared::SessionId;

use super::connection::{Connection, DeliveryReport};
use super::presence;
use super::registry::{ConnectionRegistry, RegistryError};
use super::router::{self, RelayEvent};

/// WebSocket state shared across all connections of this process
#[derive(Clone, Default)]
pub struct WebSocketState {
    registry: Arc<RwLock<ConnectionRegistry>>,
}

impl WebSocketState {
    /// Create new WebSocket state
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and announce the new count to everyone
    ///
    /// Returns the connected count after the change.
    pub async fn connect(&self, conn: Arc<Connection>) -> Result<usize, RegistryError> {
        let mut registry = self.registry.write().await;
        let session_id = conn.session_id;
        registry.add(conn)?;

        let total = registry.size();
        tracing::info!(
            session_id = %session_id,
            total_connections = total,
            "WebSocket connection added"
        );

        presence::announce(&registry);
        Ok(total)
    }

    /// Remove a connection and announce the new count to everyone left
    ///
    /// Returns `None` without announcing if the session was already gone.
    pub async fn disconnect(&self, session_id: &SessionId) -> Option<usize> {
        let mut registry = self.registry.write().await;
        if !registry.remove(session_id) {
            tracing::debug!(session_id = %session_id, "Disconnect for unknown session ignored");
            return None;
        }

        let total = registry.size();
        tracing::info!(
            session_id = %session_id,
            remaining_connections = total,
            "WebSocket connection removed"
        );

        presence::announce(&registry);
        Some(total)
    }

    /// Relay a client event to every other connected session
    pub async fn relay(&self, event: RelayEvent) -> DeliveryReport {
        let registry = self.registry.read().await;
        router::relay(&registry, event)
    }

    /// Whether a session is currently registered
    pub async fn is_connected(&self, session_id: &SessionId) -> bool {
        self.registry.read().await.contains(session_id)
    }

    /// Get total number of active connections
    pub async fn connection_count(&self) -> usize {
        self.registry.read().await.size()
    }

    /// Get statistics about the WebSocket state
    pub async fn get_stats(&self) -> WebSocketStats {
        WebSocketStats {
            active_connections: self.connection_count().await,
        }
    }
}

/// Statistics about WebSocket connections
#[derive(Debug, Clone, serde::Serialize)]
pub struct WebSocketStats {
    /// Number of active connections
    pub active_connections: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::events::{RelayKind, ServerEvent};
    use serde_json::json;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn new_conn() -> (Arc<Connection>, UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Connection::new(tx)), rx)
    }

    fn drain(rx: &mut UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test]
    async fn test_connect_announces_to_new_member() {
        let state = WebSocketState::new();
        let (conn, mut rx) = new_conn();

        assert_eq!(state.connect(conn).await, Ok(1));
        assert_eq!(drain(&mut rx), vec![ServerEvent::ClientsTotal(1)]);
    }

    #[tokio::test]
    async fn test_duplicate_connect_is_ignored_without_announcement() {
        let state = WebSocketState::new();
        let (conn, mut rx) = new_conn();
        state.connect(Arc::clone(&conn)).await.unwrap();
        drain(&mut rx);

        let (tx, mut dup_rx) = mpsc::unbounded_channel();
        let dup = Arc::new(Connection::with_id(conn.session_id, tx));
        assert!(state.connect(dup).await.is_err());

        assert_eq!(state.connection_count().await, 1);
        assert!(drain(&mut rx).is_empty());
        assert!(drain(&mut dup_rx).is_empty());
    }

    #[tokio::test]
    async fn test_double_disconnect_announces_once() {
        let state = WebSocketState::new();
        let (a, mut rx_a) = new_conn();
        let (b, _rx_b) = new_conn();
        state.connect(Arc::clone(&a)).await.unwrap();
        state.connect(Arc::clone(&b)).await.unwrap();
        drain(&mut rx_a);

        assert_eq!(state.disconnect(&b.session_id).await, Some(1));
        assert_eq!(state.disconnect(&b.session_id).await, None);

        assert_eq!(state.connection_count().await, 1);
        assert_eq!(drain(&mut rx_a), vec![ServerEvent::ClientsTotal(1)]);
    }

    #[tokio::test]
    async fn test_disconnected_session_no_longer_receives_relays() {
        let state = WebSocketState::new();
        let (a, _rx_a) = new_conn();
        let (b, mut rx_b) = new_conn();
        state.connect(Arc::clone(&a)).await.unwrap();
        state.connect(Arc::clone(&b)).await.unwrap();
        state.disconnect(&b.session_id).await;
        drain(&mut rx_b);

        let report = state
            .relay(RelayEvent::new(RelayKind::Chat, json!("late"), a.session_id))
            .await;

        assert_eq!(report.attempted(), 0);
        assert!(drain(&mut rx_b).is_empty());
        assert!(!state.is_connected(&b.session_id).await);
    }

    #[tokio::test]
    async fn test_stats() {
        let state = WebSocketState::new();
        let (conn, _rx) = new_conn();
        state.connect(conn).await.unwrap();

        let stats = state.get_stats().await;
        assert_eq!(stats.active_connections, 1);
    }
}
