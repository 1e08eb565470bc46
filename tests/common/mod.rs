//! Shared test helpers and mock providers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use profile_agent::agent::policy::{FAREWELL, GREETING, REFUSAL};
use profile_agent::error::AgentError;
use profile_agent::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use profile_agent::tools::{AgentToolParameters, Tool, ToolArguments, ToolExecutionContext};
use profile_agent::types::*;

pub fn text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        text: text.to_string(),
        usage: Usage {
            input_tokens: 10,
            output_tokens: 20,
            total_tokens: 30,
        },
        tool_calls: vec![],
        finish_reason: Some(FinishReason::Stop),
    }
}

pub fn tool_call_response(id: &str, name: &str) -> ProviderResponse {
    ProviderResponse {
        text: String::new(),
        usage: Usage {
            input_tokens: 10,
            output_tokens: 5,
            total_tokens: 15,
        },
        tool_calls: vec![AgentToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments: serde_json::json!({}),
        }],
        finish_reason: Some(FinishReason::ToolCalls),
    }
}

/// A mock provider that returns queued responses in order and records every
/// request it receives.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<VecDeque<Result<ProviderResponse, AgentError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    delay: Option<Duration>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep this long before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text_response(text)));
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(tool_call_response(id, name)));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: AgentError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(text_response("Mock response")))
    }
}

/// Deterministic stand-in for a model that follows the greeting policy.
///
/// It reads the last user message: greetings get the greeting, farewells the
/// farewell, questions about Shahid Ali trigger the profile tool and are
/// answered from its output, anything else gets the refusal.
pub struct PolicyModel {
    tool_name: String,
}

impl PolicyModel {
    pub fn new(tool_name: &str) -> Self {
        Self {
            tool_name: tool_name.to_string(),
        }
    }
}

#[async_trait]
impl ModelProvider for PolicyModel {
    fn provider_name(&self) -> &str {
        "policy-stub"
    }

    fn model_id(&self) -> &str {
        "policy-stub-1"
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, AgentError> {
        let last = request
            .messages
            .last()
            .ok_or_else(|| AgentError::InvalidArgument("empty request".into()))?;

        if last.role == Role::Tool {
            let output = last
                .content
                .iter()
                .find_map(|part| match part {
                    ContentPart::ToolResult(r) => Some(r.output.clone()),
                    _ => None,
                })
                .unwrap_or_default();
            return Ok(text_response(&format!(
                "Here is what I found about Shahid Ali: {output}"
            )));
        }

        let input = last.text_content().to_lowercase();
        let reply = if input.contains("hello") || input.starts_with("hi") {
            GREETING
        } else if input.contains("bye") {
            FAREWELL
        } else if input.contains("shahid ali") {
            return Ok(tool_call_response("call_profile", &self.tool_name));
        } else {
            REFUSAL
        };
        Ok(text_response(reply))
    }
}

/// Tool returning a fixed string and counting its invocations.
pub struct CountingTool {
    name: String,
    output: String,
    parameters: AgentToolParameters,
    calls: Arc<AtomicUsize>,
}

impl CountingTool {
    pub fn new(name: &str, output: &str) -> Self {
        Self {
            name: name.to_string(),
            output: output.to_string(),
            parameters: AgentToolParameters::empty(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl Tool for CountingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Returns a canned profile"
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(&self, _args: &ToolArguments, _ctx: &ToolExecutionContext) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output.clone()
    }
}
