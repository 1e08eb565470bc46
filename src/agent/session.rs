//! Per-session history storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::conversation::Conversation;
use crate::error::{AgentError, Result};

/// Opaque session identifier handed out by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value store of conversations, scoped by session id.
///
/// `get` hands out a copy. A stored history only changes through `set` or
/// `update`.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &SessionId) -> Option<Conversation>;
    fn set(&self, id: &SessionId, conversation: Conversation);

    /// Apply `f` to the stored conversation in place.
    ///
    /// Fails with [`AgentError::SessionNotFound`] when the session no longer
    /// exists; a removed session is never recreated.
    fn update(&self, id: &SessionId, f: &mut dyn FnMut(&mut Conversation)) -> Result<()>;

    fn remove(&self, id: &SessionId) -> Option<Conversation>;
}

/// Process-memory store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Conversation>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &SessionId) -> Option<Conversation> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.get(id).cloned()
    }

    fn set(&self, id: &SessionId, conversation: Conversation) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.insert(id.clone(), conversation);
    }

    fn update(&self, id: &SessionId, f: &mut dyn FnMut(&mut Conversation)) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let conversation = sessions
            .get_mut(id)
            .ok_or_else(|| AgentError::SessionNotFound(id.to_string()))?;
        f(conversation);
        Ok(())
    }

    fn remove(&self, id: &SessionId) -> Option<Conversation> {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.remove(id)
    }
}
