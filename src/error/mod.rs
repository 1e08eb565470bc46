//! Error types for the agent.

use thiserror::Error;

/// System-level failures. Tool failures never show up here: tools turn them
/// into text before the runner sees them.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("The maximum number of model calls ({0}) per turn has been exceeded")]
    MaxTurnsExceeded(usize),

    #[error("Session not found: {0}")]
    SessionNotFound(String),
}

/// Broad error category, used to pick a message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RateLimit,
    Network,
    Server,
    Api,
    Configuration,
    Serialization,
    Agent,
    Unknown,
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    CheckCredentials,
    CheckConfiguration,
    TryAgainLater,
    RephraseRequest,
    ContactSupport,
}

impl RecoverySuggestion {
    /// Short hint shown next to a failed turn.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::CheckCredentials => "check GEMINI_API_KEY",
            Self::CheckConfiguration => "check the model configuration",
            Self::TryAgainLater => "try again in a moment",
            Self::RephraseRequest => "try rephrasing the request",
            Self::ContactSupport => "see the logs for details",
        }
    }
}

impl AgentError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::RateLimited { .. } => ErrorCategory::RateLimit,
            Self::Network(_) | Self::Io(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::MaxTurnsExceeded(_) => ErrorCategory::Agent,
            _ => ErrorCategory::Unknown,
        }
    }

    /// Suggest a recovery action.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::TryAgainLater
            }
            ErrorCategory::Agent => RecoverySuggestion::RephraseRequest,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_maps_to_category() {
        assert_eq!(
            AgentError::api(401, "bad key").category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            AgentError::api(429, "slow down").category(),
            ErrorCategory::RateLimit
        );
        assert_eq!(AgentError::api(503, "down").category(), ErrorCategory::Server);
        assert_eq!(AgentError::api(400, "bad").category(), ErrorCategory::Api);
    }

    #[test]
    fn recovery_suggestions() {
        assert_eq!(
            AgentError::Authentication("nope".into()).recovery_suggestion(),
            RecoverySuggestion::CheckCredentials
        );
        assert_eq!(
            AgentError::MaxTurnsExceeded(10).recovery_suggestion(),
            RecoverySuggestion::RephraseRequest
        );
        assert_eq!(
            AgentError::Configuration("x".into()).recovery_suggestion(),
            RecoverySuggestion::CheckConfiguration
        );
    }

    #[test]
    fn max_turns_message_names_the_limit() {
        let err = AgentError::MaxTurnsExceeded(3);
        assert!(err.to_string().contains("(3)"));
    }
}
