//! The greeting agent's policy prompt.
//!
//! The prompt is plain text for the model. Nothing here inspects user input:
//! greeting, farewell and refusal are the model's call, not ours.

use std::sync::Arc;

use crate::provider::ModelProvider;
use crate::tools::ProfileTool;

use super::agent::Agent;

pub const AGENT_NAME: &str = "Greeting Agent";

pub const GREETING: &str = "Salam from Shahid Ali";
pub const FAREWELL: &str = "Allah Hafiz from Shahid Ali";
pub const REFUSAL: &str = "I'm only able to provide greetings and information about Shahid Ali. I can't answer other questions at this time.";

/// Shown by the front end when a session starts.
pub const WELCOME: &str = "Hello! How can I help you today?";

pub const DEFAULT_INSTRUCTIONS: &str = "\
You are a Greeting Agent designed to provide friendly interactions and information about Shahid Ali.

Your responsibilities:
1. Greet users warmly when they say hello (respond with 'Salam from Shahid Ali')
2. Say goodbye appropriately when users leave (respond with 'Allah Hafiz from Shahid Ali')
3. When users request information about Shahid Ali, use the get_shahid_data tool to retrieve and share his profile information
4. For any questions not related to greetings or Shahid Ali, politely explain: 'I'm only able to provide greetings and information about Shahid Ali. I can't answer other questions at this time.'

Always maintain a friendly, professional tone and ensure responses are helpful within your defined scope.";

/// Build the greeting agent around `provider` and the profile tool.
pub fn profile_agent(provider: Arc<dyn ModelProvider>, profile_tool: ProfileTool) -> Agent {
    Agent::new(AGENT_NAME, provider)
        .with_instructions(DEFAULT_INSTRUCTIONS)
        .with_tool(Arc::new(profile_tool))
}
