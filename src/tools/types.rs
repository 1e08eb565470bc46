//! Tool parameter schema.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON Schema of a tool's arguments, sent to the model as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentToolParameters {
    pub schema: Value,
}

impl AgentToolParameters {
    /// Schema for a tool that takes no arguments.
    pub fn empty() -> Self {
        Self {
            schema: json!({ "type": "object", "properties": {} }),
        }
    }
}

impl Default for AgentToolParameters {
    fn default() -> Self {
        Self::empty()
    }
}
