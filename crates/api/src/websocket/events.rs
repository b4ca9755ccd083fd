//! WebSocket event types and serialization
//!
//! Every frame is a JSON object of the form `{"event": <name>, "data": <payload>}`.
//! Event names are part of the wire contract with the browser client and must
//! not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Client-to-Server Events
// =============================================================================

/// Events sent from client to server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Chat message to relay to everyone else
    #[serde(rename = "message")]
    Message(Value),

    /// Feedback notice (e.g. "alice is typing") to relay to everyone else
    #[serde(rename = "feedback")]
    Feedback(Value),
}

impl ClientEvent {
    /// Split into the relay kind and the untouched payload
    pub fn into_parts(self) -> (RelayKind, Value) {
        match self {
            ClientEvent::Message(data) => (RelayKind::Chat, data),
            ClientEvent::Feedback(data) => (RelayKind::Feedback, data),
        }
    }
}

// =============================================================================
// Server-to-Client Events
// =============================================================================

/// Events sent from server to client
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Number of currently connected clients
    #[serde(rename = "clients-total")]
    ClientsTotal(usize),

    /// Chat message relayed from another client
    #[serde(rename = "chat-message")]
    ChatMessage(Value),

    /// Feedback relayed from another client
    #[serde(rename = "feedback")]
    Feedback(Value),
}

impl ServerEvent {
    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::ClientsTotal(_) => "clients-total",
            ServerEvent::ChatMessage(_) => "chat-message",
            ServerEvent::Feedback(_) => "feedback",
        }
    }
}

// =============================================================================
// Relay Data Structures
// =============================================================================

/// Category of a relayed client event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayKind {
    Chat,
    Feedback,
}

impl RelayKind {
    /// Build the outbound event carrying `payload` unchanged
    pub fn outbound(self, payload: Value) -> ServerEvent {
        match self {
            RelayKind::Chat => ServerEvent::ChatMessage(payload),
            RelayKind::Feedback => ServerEvent::Feedback(payload),
        }
    }
}
