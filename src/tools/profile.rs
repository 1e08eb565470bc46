//! Profile fetch tool: one GET to a fixed URL, result always returned as text.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::config::DEFAULT_PROFILE_URL;
use crate::provider::http::shared_client;

pub const PROFILE_TOOL_NAME: &str = "get_shahid_data";

const PROFILE_TOOL_DESCRIPTION: &str =
    "Fetch Shahid Ali's public profile page. Takes no arguments and returns the raw page content.";

/// Fetches the profile page.
///
/// * 200: the body, untouched.
/// * any other status: `Error: <status code>`.
/// * transport failure: `Error: <error message>`.
#[derive(Debug, Clone)]
pub struct ProfileTool {
    name: String,
    url: String,
    parameters: AgentToolParameters,
    client: reqwest::Client,
}

impl Default for ProfileTool {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_URL)
    }
}

impl ProfileTool {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            name: PROFILE_TOOL_NAME.to_string(),
            url: url.into(),
            parameters: AgentToolParameters::empty(),
            client: shared_client().clone(),
        }
    }

    /// Register under a different tool name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Use a specific HTTP client (timeouts, proxies).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform the fetch.
    pub async fn fetch(&self) -> String {
        debug!(url = %self.url, "fetching profile");

        let response = match self.client.get(&self.url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %self.url, error = %e, "profile fetch failed");
                return format!("Error: {e}");
            }
        };

        let status = response.status().as_u16();
        if status != 200 {
            warn!(url = %self.url, status, "profile fetch returned non-200 status");
            return format!("Error: {status}");
        }

        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %self.url, error = %e, "reading profile body failed");
                format!("Error: {e}")
            }
        }
    }
}

#[async_trait]
impl Tool for ProfileTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        PROFILE_TOOL_DESCRIPTION
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(&self, _args: &ToolArguments, _ctx: &ToolExecutionContext) -> String {
        self.fetch().await
    }
}
