//! Turn resolution with a bounded tool loop.

use tracing::{debug, warn};

use crate::error::AgentError;
use crate::provider::ProviderRequest;
use crate::tools::{ToolArguments, ToolExecutionContext};
use crate::types::*;

use super::agent::Agent;

/// One model call inside a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStep {
    pub text: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub tool_results: Vec<AgentToolResult>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Outcome of a turn.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Final assistant text.
    pub text: String,
    pub steps: Vec<RunStep>,
    /// Usage summed over every step.
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

impl RunResult {
    /// Number of tool calls executed during the turn.
    pub fn tool_call_count(&self) -> usize {
        self.steps.iter().map(|s| s.tool_calls.len()).sum()
    }
}

/// Executes single agent turns. Holds no state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Runner;

impl Runner {
    /// Run `agent` against `history` until the model answers without tool
    /// calls.
    ///
    /// `history` is only read. At most `agent.max_turns()` model calls are
    /// made; a model that still wants tools after that fails the turn with
    /// [`AgentError::MaxTurnsExceeded`]. Provider errors propagate as-is.
    pub async fn run(&self, agent: &Agent, history: &[ModelMessage]) -> Result<RunResult, AgentError> {
        let provider = agent.provider();
        let tool_defs = agent.tool_definitions();

        let mut messages = Vec::with_capacity(history.len() + 1);
        if !agent.instructions().is_empty() {
            messages.push(ModelMessage::system(agent.instructions()));
        }
        messages.extend(history.iter().cloned());

        let mut steps = Vec::new();
        let mut total_usage = Usage::default();

        for iteration in 0..agent.max_turns() {
            let request = ProviderRequest {
                messages: messages.clone(),
                settings: agent.settings().clone(),
                tools: tool_defs.clone(),
            };

            debug!(
                agent = agent.name(),
                model = provider.model_id(),
                iteration,
                "calling provider"
            );
            let response = provider.generate_text(&request).await?;
            total_usage.merge(&response.usage);

            if response.tool_calls.is_empty() {
                steps.push(RunStep {
                    text: response.text.clone(),
                    tool_calls: Vec::new(),
                    tool_results: Vec::new(),
                    usage: response.usage,
                    finish_reason: response.finish_reason,
                });
                return Ok(RunResult {
                    text: response.text,
                    steps,
                    usage: total_usage,
                    finish_reason: response.finish_reason,
                });
            }

            messages.push(ModelMessage::assistant_tool_calls(
                &response.text,
                &response.tool_calls,
            ));

            let mut tool_results = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                let output = match agent.find_tool(&call.name) {
                    Some(tool) => {
                        debug!(tool = %call.name, id = %call.id, "executing tool");
                        let ctx = ToolExecutionContext {
                            tool_call_id: call.id.clone(),
                        };
                        tool.execute(&ToolArguments::new(call.arguments.clone()), &ctx)
                            .await
                    }
                    None => {
                        warn!(tool = %call.name, "model requested unknown tool");
                        format!("Error: Tool '{}' not found", call.name)
                    }
                };
                messages.push(ModelMessage::tool_result(call.id.clone(), output.clone()));
                tool_results.push(AgentToolResult {
                    tool_call_id: call.id.clone(),
                    output,
                });
            }

            steps.push(RunStep {
                text: response.text,
                tool_calls: response.tool_calls,
                tool_results,
                usage: response.usage,
                finish_reason: response.finish_reason,
            });
        }

        warn!(
            agent = agent.name(),
            max_turns = agent.max_turns(),
            "tool loop did not finish"
        );
        Err(AgentError::MaxTurnsExceeded(agent.max_turns()))
    }
}
