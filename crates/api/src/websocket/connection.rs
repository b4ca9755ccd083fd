//! WebSocket connection handle
//!
//! The outbound half of one client session. The socket itself is owned by the
//! per-connection task; everything else only holds this handle.

use ipchat_shared::SessionId;
use tokio::sync::mpsc;

use super::events::ServerEvent;

/// Represents an active WebSocket connection
#[derive(Debug)]
pub struct Connection {
    /// Unique session ID for this connection
    pub session_id: SessionId,

    /// Channel to send events to this connection
    sender: mpsc::UnboundedSender<ServerEvent>,
}

impl Connection {
    /// Create a new connection with a fresh session ID
    pub fn new(sender: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self::with_id(SessionId::new(), sender)
    }

    /// Create a connection with a caller-chosen session ID
    pub fn with_id(session_id: SessionId, sender: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self { session_id, sender }
    }

    /// Send an event to this connection
    ///
    /// Never blocks. Fails only when the socket task has already gone away.
    pub fn send(&self, event: ServerEvent) -> Result<(), ConnectionClosed> {
        self.sender
            .send(event)
            .map_err(|_| ConnectionClosed(self.session_id))
    }

    /// Whether the receiving side of this connection has been dropped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Connection {0} is closed")]
pub struct ConnectionClosed(pub SessionId);

/// Outcome of one fan-out
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Sends that reached a live connection
    pub delivered: usize,
    /// Sends dropped because the connection was already closed
    pub failed: usize,
}

impl DeliveryReport {
    /// Fold one send result into the report, logging failures
    pub fn record(&mut self, result: Result<(), ConnectionClosed>) {
        match result {
            Ok(()) => self.delivered += 1,
            Err(ConnectionClosed(session_id)) => {
                self.failed += 1;
                tracing::warn!(
                    session_id = %session_id,
                    "Failed to send event to connection (likely closed)"
                );
            }
        }
    }

    /// Total number of attempted sends
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}
