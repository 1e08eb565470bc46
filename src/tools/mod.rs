//! Tool system for function calling.

pub mod arguments;
pub mod profile;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use profile::{ProfileTool, PROFILE_TOOL_NAME};
pub use tool::{AgentTool, Tool, ToolExecutionContext};
pub use types::AgentToolParameters;
