//! Per-connection session lifecycle
//!
//! `Connecting -> Connected -> Disconnected`. A session is never reopened; a
//! reconnecting client gets a brand-new session and ID.

use std::sync::Arc;

use ipchat_shared::SessionId;
use tokio::sync::mpsc;

use super::connection::{Connection, DeliveryReport};
use super::events::{ClientEvent, ServerEvent};
use super::registry::RegistryError;
use super::router::RelayEvent;
use super::state::WebSocketState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Connected,
    Disconnected,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session {0} cannot be opened from state {1:?}")]
    NotConnecting(SessionId, SessionState),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One client's session, owned by its socket task
pub struct Session {
    connection: Arc<Connection>,
    ws_state: WebSocketState,
    state: SessionState,
}

impl Session {
    /// Create a session in the `Connecting` state
    pub fn new(ws_state: WebSocketState, sender: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self::from_connection(ws_state, Arc::new(Connection::new(sender)))
    }

    pub fn from_connection(ws_state: WebSocketState, connection: Arc<Connection>) -> Self {
        Self {
            connection,
            ws_state,
            state: SessionState::Connecting,
        }
    }

    pub fn id(&self) -> SessionId {
        self.connection.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Join the registry and announce the new count
    ///
    /// On a refused registration the session goes straight to `Disconnected`.
    /// Only a `Connecting` session can be opened; any other state is left as is.
    pub async fn open(&mut self) -> Result<usize, SessionError> {
        if self.state != SessionState::Connecting {
            return Err(SessionError::NotConnecting(self.id(), self.state));
        }

        match self.ws_state.connect(Arc::clone(&self.connection)).await {
            Ok(total) => {
                self.state = SessionState::Connected;
                Ok(total)
            }
            Err(e) => {
                self.state = SessionState::Disconnected;
                Err(e.into())
            }
        }
    }

    /// Relay an inbound client event to everyone else
    ///
    /// Events arriving outside `Connected` are dropped.
    pub async fn dispatch(&self, event: ClientEvent) -> Option<DeliveryReport> {
        if self.state != SessionState::Connected {
            tracing::debug!(session_id = %self.id(), state = ?self.state, "Dropping event for inactive session");
            return None;
        }

        let (kind, payload) = event.into_parts();
        let report = self
            .ws_state
            .relay(RelayEvent::new(kind, payload, self.id()))
            .await;
        Some(report)
    }

    /// Leave the registry and announce the new count. Safe to call repeatedly.
    pub async fn close(&mut self) {
        let previous = std::mem::replace(&mut self.state, SessionState::Disconnected);
        if previous == SessionState::Connected {
            self.ws_state.disconnect(&self.id()).await;
        }
    }
}
