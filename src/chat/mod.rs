//! Chat front end: session lifecycle and turn handling.
//!
//! The front end is the only writer of session history. A turn reads a copy
//! of the stored history, runs the agent on it, and only commits the user
//! message plus the reply once the run has succeeded.

use std::sync::Arc;

use tracing::info;

use crate::agent::policy::WELCOME;
use crate::agent::{Agent, Conversation, SessionId, SessionStore};
use crate::error::{AgentError, Result};
use crate::types::ModelMessage;

pub struct ChatFrontend {
    agent: Arc<Agent>,
    store: Arc<dyn SessionStore>,
}

impl ChatFrontend {
    pub fn new(agent: Arc<Agent>, store: Arc<dyn SessionStore>) -> Self {
        Self { agent, store }
    }

    /// Open a session with empty history and return its id plus the welcome
    /// line to show.
    pub fn start_session(&self) -> (SessionId, &'static str) {
        let id = SessionId::new();
        self.store.set(&id, Conversation::new());
        info!(session = %id, agent = self.agent.name(), "session started");
        (id, WELCOME)
    }

    /// Run one turn for `input` and return the reply.
    ///
    /// On error the stored history is left exactly as it was. A session
    /// ended while the turn was running stays ended; the reply is dropped
    /// and the turn fails with [`AgentError::SessionNotFound`].
    pub async fn handle_message(&self, id: &SessionId, input: &str) -> Result<String> {
        let mut history = self
            .store
            .get(id)
            .ok_or_else(|| AgentError::SessionNotFound(id.to_string()))?
            .messages()
            .to_vec();
        history.push(ModelMessage::user(input));

        let result = self.agent.run(&history).await?;

        let committed = self.store.update(id, &mut |conversation| {
            conversation.add_user_message(input);
            conversation.add_assistant_message(result.text.clone());
        });
        if let Err(e) = committed {
            info!(session = %id, "session ended during turn, reply dropped");
            return Err(e);
        }

        Ok(result.text)
    }

    /// Current history of a session.
    pub fn history(&self, id: &SessionId) -> Option<Conversation> {
        self.store.get(id)
    }

    /// Drop a session and its history.
    pub fn end_session(&self, id: &SessionId) -> Option<Conversation> {
        let removed = self.store.remove(id);
        if removed.is_some() {
            info!(session = %id, "session ended");
        }
        removed
    }
}
