//! Tests for the turn runner using mock providers.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{CountingTool, MockProvider, PolicyModel};
use pretty_assertions::assert_eq;
use profile_agent::agent::policy::{DEFAULT_INSTRUCTIONS, FAREWELL, GREETING, REFUSAL};
use profile_agent::agent::{profile_agent, Agent, Runner};
use profile_agent::error::AgentError;
use profile_agent::tools::{ProfileTool, PROFILE_TOOL_NAME};
use profile_agent::types::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PROFILE_BODY: &str = "<html>Shahid Ali - Rust developer</html>";

fn policy_agent() -> (Agent, Arc<std::sync::atomic::AtomicUsize>) {
    let tool = CountingTool::new(PROFILE_TOOL_NAME, PROFILE_BODY);
    let counter = tool.counter();
    let agent = Agent::new("Greeting Agent", Arc::new(PolicyModel::new(PROFILE_TOOL_NAME)))
        .with_instructions(DEFAULT_INSTRUCTIONS)
        .with_tool(Arc::new(tool));
    (agent, counter)
}

#[tokio::test]
async fn greeting_returns_the_greeting_phrase() {
    let (agent, counter) = policy_agent();

    let result = Runner
        .run(&agent, &[ModelMessage::user("hello")])
        .await
        .unwrap();

    assert_eq!(result.text, GREETING);
    assert_eq!(result.steps.len(), 1);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn farewell_returns_the_farewell_phrase() {
    let (agent, _) = policy_agent();

    let result = agent.run(&[ModelMessage::user("ok, bye!")]).await.unwrap();

    assert_eq!(result.text, FAREWELL);
}

#[tokio::test]
async fn out_of_scope_input_is_refused() {
    let (agent, counter) = policy_agent();

    let result = agent
        .run(&[ModelMessage::user("what is 2+2")])
        .await
        .unwrap();

    assert_eq!(result.text, REFUSAL);
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn profile_question_runs_the_tool_once() {
    let (agent, counter) = policy_agent();

    let result = agent
        .run(&[ModelMessage::user("tell me about Shahid Ali")])
        .await
        .unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(result.tool_call_count(), 1);
    assert!(result.text.contains(PROFILE_BODY));
    assert_ne!(result.text, PROFILE_TOOL_NAME);
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].tool_results[0].output, PROFILE_BODY);
    assert_eq!(result.steps[0].finish_reason, Some(FinishReason::ToolCalls));
}

#[tokio::test]
async fn same_history_gives_same_text() {
    let (agent, _) = policy_agent();
    let history = vec![
        ModelMessage::user("hello"),
        ModelMessage::assistant(GREETING),
        ModelMessage::user("tell me about Shahid Ali"),
    ];

    let first = agent.run(&history).await.unwrap();
    let second = agent.run(&history).await.unwrap();

    assert_eq!(first.text, second.text);
}

#[tokio::test]
async fn request_carries_instructions_history_and_tools() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_response("done");
    let agent = Agent::new("test", provider.clone())
        .with_instructions("be brief")
        .with_tool(Arc::new(CountingTool::new("lookup", "x")))
        .with_settings(GenerationSettings::builder().temperature(0.2).build());

    let history = vec![
        ModelMessage::user("hello"),
        ModelMessage::assistant("hi"),
        ModelMessage::user("again"),
    ];
    agent.run(&history).await.unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.messages.len(), 4);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].text_content(), "be brief");
    assert_eq!(&request.messages[1..], &history[..]);
    assert_eq!(request.settings.temperature, Some(0.2));
    let tools = request.tools.as_ref().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "lookup");
}

#[tokio::test]
async fn tool_result_is_fed_back_to_the_model() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_tool_call("call_1", "lookup");
    provider.queue_response("final");
    let agent = Agent::new("test", provider.clone())
        .with_tool(Arc::new(CountingTool::new("lookup", "tool output")));

    let result = agent.run(&[ModelMessage::user("go")]).await.unwrap();
    assert_eq!(result.text, "final");
    assert_eq!(
        result.usage,
        Usage {
            input_tokens: 20,
            output_tokens: 25,
            total_tokens: 45,
        }
    );

    let second = &provider.requests()[1];
    let roles: Vec<Role> = second.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::Tool]);
    assert_eq!(second.messages[1].tool_calls()[0].name, "lookup");
    assert_eq!(
        second.messages[2].content,
        vec![ContentPart::ToolResult(AgentToolResult {
            tool_call_id: "call_1".into(),
            output: "tool output".into(),
        })]
    );
}

#[tokio::test]
async fn unknown_tool_is_reported_to_the_model() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_tool_call("call_1", "nonexistent");
    provider.queue_response("I couldn't find that tool.");
    let agent = Agent::new("test", provider.clone());

    let result = agent
        .run(&[ModelMessage::user("use a tool")])
        .await
        .unwrap();

    assert_eq!(result.text, "I couldn't find that tool.");
    assert_eq!(
        result.steps[0].tool_results[0].output,
        "Error: Tool 'nonexistent' not found"
    );
}

#[tokio::test]
async fn endless_tool_calls_hit_the_turn_limit() {
    let provider = Arc::new(MockProvider::new("test-model"));
    for i in 0..5 {
        provider.queue_tool_call(&format!("call_{i}"), "lookup");
    }
    let tool = CountingTool::new("lookup", "again");
    let counter = tool.counter();
    let agent = Agent::new("test", provider.clone())
        .with_tool(Arc::new(tool))
        .with_max_turns(3);

    let err = agent.run(&[ModelMessage::user("loop")]).await.unwrap_err();

    assert!(matches!(err, AgentError::MaxTurnsExceeded(3)));
    assert_eq!(provider.requests().len(), 3);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn provider_errors_propagate() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_error(AgentError::Authentication("invalid key".into()));
    let agent = Agent::new("test", provider);

    let err = agent.run(&[ModelMessage::user("hello")]).await.unwrap_err();

    assert!(matches!(err, AgentError::Authentication(msg) if msg == "invalid key"));
}

#[tokio::test]
async fn later_tool_with_same_name_replaces_earlier() {
    let provider = Arc::new(MockProvider::new("test-model"));
    provider.queue_tool_call("call_1", "lookup");
    provider.queue_response("ok");
    let agent = Agent::new("test", provider)
        .with_tool(Arc::new(CountingTool::new("lookup", "old")))
        .with_tool(Arc::new(CountingTool::new("lookup", "new")));

    assert_eq!(agent.tools().len(), 1);
    let result = agent.run(&[ModelMessage::user("go")]).await.unwrap();
    assert_eq!(result.steps[0].tool_results[0].output, "new");
}

async fn profile_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shahidali54"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    server
}

fn greeting_agent(server: &MockServer) -> Agent {
    profile_agent(
        Arc::new(PolicyModel::new(PROFILE_TOOL_NAME)),
        ProfileTool::new(format!("{}/shahidali54", server.uri())),
    )
}

#[tokio::test]
async fn greeting_agent_registers_the_tool_its_instructions_name() {
    let server = MockServer::start().await;
    let agent = greeting_agent(&server);

    let names: Vec<&str> = agent.tools().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec![PROFILE_TOOL_NAME]);
    assert!(agent.instructions().contains(names[0]));
    assert_eq!(agent.instructions(), DEFAULT_INSTRUCTIONS);
}

#[tokio::test]
async fn greeting_agent_answers_from_fetched_profile() {
    let server = profile_server(200, PROFILE_BODY).await;
    let agent = greeting_agent(&server);

    let result = agent
        .run(&[ModelMessage::user("tell me about Shahid Ali")])
        .await
        .unwrap();

    assert_eq!(result.tool_call_count(), 1);
    assert_eq!(result.steps[0].tool_results[0].output, PROFILE_BODY);
    assert!(result.text.contains(PROFILE_BODY));
}

#[tokio::test]
async fn failed_profile_fetch_does_not_abort_the_turn() {
    let server = profile_server(503, "unavailable").await;
    let agent = greeting_agent(&server);

    let result = agent
        .run(&[ModelMessage::user("tell me about Shahid Ali")])
        .await
        .unwrap();

    assert_eq!(result.steps[0].tool_results[0].output, "Error: 503");
    assert!(result.text.contains("Error: 503"));
    assert_eq!(result.finish_reason, Some(FinishReason::Stop));
}
