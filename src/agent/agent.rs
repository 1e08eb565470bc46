//! The agent: instructions, tools and the model that drives them.

use std::sync::Arc;

use crate::config::DEFAULT_MAX_TURNS;
use crate::error::AgentError;
use crate::provider::{ModelProvider, ToolDefinition};
use crate::tools::Tool;
use crate::types::{GenerationSettings, ModelMessage};

use super::runner::{RunResult, Runner};

/// A named bundle of a policy prompt, a tool set and a model provider.
///
/// Agents hold no conversation state. Build one at startup and share it
/// (`Arc<Agent>`) between sessions.
pub struct Agent {
    name: String,
    instructions: String,
    provider: Arc<dyn ModelProvider>,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
    max_turns: usize,
}

impl Agent {
    /// Create a new agent with no instructions and no tools.
    pub fn new(name: impl Into<String>, provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            provider,
            tools: Vec::new(),
            settings: GenerationSettings::default(),
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Set the instruction policy. It is sent to the model verbatim.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Add a tool. A tool with the same name replaces the earlier one.
    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
        self
    }

    /// Set generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Max model calls per turn. Values below 1 are raised to 1.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Resolve a tool by name.
    pub fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Definitions sent to the provider, or `None` when there are no tools.
    pub fn tool_definitions(&self) -> Option<Vec<ToolDefinition>> {
        if self.tools.is_empty() {
            return None;
        }
        Some(self.tools.iter().map(|t| t.as_ref().into()).collect())
    }

    /// Run one turn against `history`.
    pub async fn run(&self, history: &[ModelMessage]) -> Result<RunResult, AgentError> {
        Runner.run(self, history).await
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.provider.model_id())
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("max_turns", &self.max_turns)
            .finish()
    }
}
