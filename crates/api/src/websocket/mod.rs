//! WebSocket support for real-time chat
//!
//! Provides the live chat channel behind the `/chat` page:
//! - Connected-count announcements on every join and leave
//! - Chat messages relayed to every other client
//! - Feedback notices (typing indicators) relayed to every other client
//!
//! # Architecture
//!
//! - **Connection**: Outbound handle for one socket
//! - **Registry**: The set of currently open sessions
//! - **Presence**: `clients-total` announcements
//! - **Router**: Fan-out to everyone but the sender
//! - **Session**: Per-socket lifecycle state machine
//! - **State**: Per-process owner of the registry
//! - **Handler**: Axum WebSocket route handler
//! - **Events**: Wire event definitions for client/server communication

pub mod connection;
pub mod events;
pub mod handler;
pub mod presence;
pub mod registry;
pub mod router;
pub mod session;
pub mod state;

pub use handler::ws_handler;
pub use state::WebSocketState;
