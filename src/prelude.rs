//! Convenience re-exports for common use.

pub use crate::agent::{Agent, Conversation, RunResult, Runner, SessionId, SessionStore};
pub use crate::config::{AppConfig, ModelConfig};
pub use crate::error::{AgentError, Result};
pub use crate::provider::ModelProvider;
pub use crate::tools::{AgentTool, AgentToolParameters, ProfileTool, Tool, ToolArguments};
pub use crate::types::{GenerationSettings, ModelMessage, Role, Usage};
