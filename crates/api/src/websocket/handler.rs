//! WebSocket handler for Axum
//!
//! Upgrades the HTTP request, runs the session lifecycle and routes inbound
//! frames. Chat participants are anonymous; no token is required here.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{stream::StreamExt, SinkExt};
use tokio::sync::mpsc;

use crate::state::AppState;

use super::{
    events::{ClientEvent, ServerEvent},
    session::Session,
    state::WebSocketState,
};

/// Largest inbound frame accepted from a client
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Bytes of an unparseable frame kept in the warning log
const LOGGED_FRAME_PREFIX: usize = 128;

/// WebSocket handler - upgrades HTTP connection to WebSocket
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    let ws_state = app_state.ws_state.clone();
    ws.max_message_size(MAX_MESSAGE_SIZE)
        .max_frame_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_socket(socket, ws_state))
}

/// Leading part of a frame for logging, cut on a char boundary
fn frame_preview(text: &str) -> &str {
    if text.len() <= LOGGED_FRAME_PREFIX {
        return text;
    }
    let mut end = LOGGED_FRAME_PREFIX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Handle individual WebSocket connection
pub async fn handle_socket(socket: WebSocket, ws_state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    // Create channel for sending events to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let mut session = Session::new(ws_state, tx);
    let session_id = session.id();

    // Spawn task to send messages to client
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break; // Connection closed
                    }
                }
                Err(e) => {
                    tracing::error!(error = ?e, "Failed to serialize WebSocket event");
                }
            }
        }
    });

    // Registration and the first announcement finish before any inbound frame is read
    if let Err(e) = session.open().await {
        tracing::error!(error = %e, session_id = %session_id, "Refusing WebSocket session");
        send_task.abort();
        return;
    }
    tracing::info!(session_id = %session_id, "Socket connected");

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => {
                    session.dispatch(event).await;
                }
                Err(e) => {
                    tracing::warn!(
                        error = ?e,
                        session_id = %session_id,
                        len = text.len(),
                        preview = frame_preview(&text),
                        "Failed to parse client event"
                    );
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!(session_id = %session_id, "WebSocket close frame received");
                break;
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // Axum handles ping/pong automatically
            }
            Ok(Message::Binary(_)) => {} // Ignore binary messages
            Err(e) => {
                tracing::info!(error = %e, session_id = %session_id, "WebSocket transport error");
                break;
            }
        }
    }

    tracing::info!(session_id = %session_id, "Socket disconnected");
    session.close().await;
    send_task.abort();
}
