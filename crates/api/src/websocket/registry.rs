//! Connected-set registry
//!
//! Tracks which sessions currently have an open socket. This type does no
//! locking of its own; [`WebSocketState`](super::state::WebSocketState) owns it
//! behind a lock and is the only place that mutates it.

use std::collections::HashMap;
use std::sync::Arc;

use ipchat_shared::SessionId;

use super::connection::Connection;

/// Set of currently open sessions, keyed by session ID
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    members: HashMap<SessionId, Arc<Connection>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly opened connection
    ///
    /// A live ID is never replaced: the registry is left unchanged and
    /// `DuplicateSession` is returned.
    pub fn add(&mut self, conn: Arc<Connection>) -> Result<(), RegistryError> {
        let session_id = conn.session_id;
        if self.members.contains_key(&session_id) {
            return Err(RegistryError::DuplicateSession(session_id));
        }
        self.members.insert(session_id, conn);
        Ok(())
    }

    /// Remove a session. Returns false if it was not registered.
    pub fn remove(&mut self, session_id: &SessionId) -> bool {
        self.members.remove(session_id).is_some()
    }

    /// Number of registered sessions
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.members.contains_key(session_id)
    }

    /// Visit every registered connection, in no particular order
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&Connection),
    {
        for conn in self.members.values() {
            f(conn);
        }
    }

    /// Visit every registered connection except `exclude`, in no particular order
    pub fn for_each_other<F>(&self, exclude: &SessionId, mut f: F)
    where
        F: FnMut(&Connection),
    {
        for conn in self.members.values() {
            if conn.session_id != *exclude {
                f(conn);
            }
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Session {0} is already registered")]
    DuplicateSession(SessionId),
}
