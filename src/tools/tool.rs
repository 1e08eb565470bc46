//! Tool trait and closure-based tool wrapper.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::AgentError;
use crate::provider::ToolDefinition;

/// Context available during tool execution.
#[derive(Debug, Clone, Default)]
pub struct ToolExecutionContext {
    /// Id of the model's tool call being served.
    pub tool_call_id: String,
}

/// Core tool trait — implement to create custom tools.
///
/// `execute` returns text in every case. A tool that fails describes the
/// failure in that text so the model can decide how to relay it; nothing a
/// tool does can abort the turn.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &AgentToolParameters;

    /// Execute the tool with parsed arguments.
    async fn execute(&self, args: &ToolArguments, ctx: &ToolExecutionContext) -> String;
}

impl From<&dyn Tool> for ToolDefinition {
    fn from(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            parameters: tool.parameters().schema.clone(),
        }
    }
}

/// Type alias for the tool handler function.
type ToolHandler = dyn Fn(
        ToolArguments,
        ToolExecutionContext,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send>>
    + Send
    + Sync;

/// Closure-based tool for quick tool creation.
///
/// The handler may fail; the error is turned into `"Error: <message>"` text
/// here, at the tool boundary.
pub struct AgentTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    handler: Arc<ToolHandler>,
}

impl AgentTool {
    /// Create a tool from a closure.
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, AgentError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(&self, args: &ToolArguments, ctx: &ToolExecutionContext) -> String {
        match (self.handler)(args.clone(), ctx.clone()).await {
            Ok(text) => text,
            Err(e) => {
                warn!(tool = %self.name, error = %e, "tool handler failed");
                format!("Error: {e}")
            }
        }
    }
}

impl std::fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentTool")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_errors_become_text() {
        let tool = AgentTool::new(
            "lookup",
            "Look something up",
            AgentToolParameters {
                schema: serde_json::json!({
                    "type": "object",
                    "properties": { "query": { "type": "string" } },
                    "required": ["query"],
                }),
            },
            |args, _ctx| async move {
                let query = args.get_str("query")?;
                Ok(format!("found {query}"))
            },
        );
        let ctx = ToolExecutionContext::default();

        let ok = tool
            .execute(&ToolArguments::new(serde_json::json!({"query": "rust"})), &ctx)
            .await;
        assert_eq!(ok, "found rust");

        let err = tool
            .execute(&ToolArguments::new(serde_json::json!({})), &ctx)
            .await;
        assert_eq!(err, "Error: Invalid argument: Missing string argument: query");
    }

    #[test]
    fn definition_copies_schema() {
        let tool = AgentTool::new(
            "noop",
            "Does nothing",
            AgentToolParameters::empty(),
            |_args, _ctx| async move { Ok(String::new()) },
        );
        let def = ToolDefinition::from(&tool as &dyn Tool);
        assert_eq!(def.name, "noop");
        assert_eq!(def.parameters["type"], "object");
    }
}
