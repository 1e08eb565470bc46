//! Configuration (layered: CLI overrides > env > config file > defaults).
//!
//! Everything here is resolved once at startup. The resulting [`AppConfig`]
//! is read-only and handed to the rest of the program by reference.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::types::GenerationSettings;

/// Environment variable holding the model-provider credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const PROFILE_URL_ENV: &str = "PROFILE_URL";
pub const MAX_TURNS_ENV: &str = "AGENT_MAX_TURNS";

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_MODEL_ID: &str = "gemini-2.0-flash";
pub const DEFAULT_PROFILE_URL: &str = "https://github.com/shahidali54";
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Credentials and location of the model endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ModelConfig {
    api_key: String,
    base_url: String,
    model_id: String,
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"..")
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl ModelConfig {
    /// Validate and build a model configuration.
    ///
    /// Fails with [`AgentError::Configuration`] when the credential is
    /// absent or could not be sent as a bearer token, when the base URL is
    /// not an absolute http(s) URL, or when the model id is empty.
    pub fn configure(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let base_url = base_url.into();
        let model_id = model_id.into();

        if api_key.trim().is_empty() {
            return Err(AgentError::Configuration(format!("{API_KEY_ENV} is empty")));
        }
        if api_key
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AgentError::Configuration(format!(
                "{API_KEY_ENV} contains whitespace or control characters"
            )));
        }

        check_http_url("base URL", &base_url)?;

        if model_id.trim().is_empty() {
            return Err(AgentError::Configuration("Model id is empty".into()));
        }

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id,
        })
    }

    /// Load from `GEMINI_API_KEY`, `GEMINI_BASE_URL` and `GEMINI_MODEL`.
    ///
    /// Only the process environment is read. The binary loads `.env` into it
    /// once at startup.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AgentError::Configuration(format!("Missing {API_KEY_ENV}")))?;
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model_id = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL_ID.into());
        Self::configure(api_key, base_url, model_id)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Accept only absolute http(s) URLs.
fn check_http_url(what: &str, raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| AgentError::Configuration(format!("Invalid {what} '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AgentError::Configuration(format!(
            "The {what} must use http or https, got '{}'",
            parsed.scheme()
        )));
    }
    Ok(())
}

/// On-disk TOML configuration. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub model: ModelSection,
    pub agent: AgentSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_id: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AgentSection {
    pub profile_url: Option<String>,
    pub max_turns: Option<usize>,
}

impl FileConfig {
    /// Parse a TOML config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            AgentError::Configuration(format!("Invalid config file {}: {e}", path.display()))
        })
    }
}

/// Values passed on the command line. They win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub model_id: Option<String>,
    pub base_url: Option<String>,
    pub profile_url: Option<String>,
    pub max_turns: Option<usize>,
    pub temperature: Option<f64>,
}

/// Fully resolved process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub profile_url: String,
    pub max_turns: usize,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
}

/// `<platform config dir>/profile-agent/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "profile-agent")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl AppConfig {
    /// Resolve the configuration from the process environment, the config
    /// file and `overrides`.
    ///
    /// An explicit `config_path` must exist; the default path is only read
    /// when present.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => FileConfig::from_path(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!(path = %path.display(), "loading default config file");
                    FileConfig::from_path(&path)?
                }
                None => FileConfig::default(),
            },
        };

        Self::from_sources(file, |key| std::env::var(key).ok(), overrides)
    }

    /// Merge already-read sources. `env` looks up one environment variable.
    pub fn from_sources<F>(file: FileConfig, env: F, overrides: &ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = env(API_KEY_ENV)
            .or(file.model.api_key)
            .ok_or_else(|| AgentError::Configuration(format!("Missing {API_KEY_ENV}")))?;

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| env(BASE_URL_ENV))
            .or(file.model.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model_id = overrides
            .model_id
            .clone()
            .or_else(|| env(MODEL_ENV))
            .or(file.model.model_id)
            .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());

        let model = ModelConfig::configure(api_key, base_url, model_id)?;

        let profile_url = overrides
            .profile_url
            .clone()
            .or_else(|| env(PROFILE_URL_ENV))
            .or(file.agent.profile_url)
            .unwrap_or_else(|| DEFAULT_PROFILE_URL.to_string());
        check_http_url("profile URL", &profile_url)?;

        let env_max_turns = env(MAX_TURNS_ENV)
            .map(|raw| {
                raw.trim().parse::<usize>().map_err(|_| {
                    AgentError::Configuration(format!("{MAX_TURNS_ENV} must be a positive integer"))
                })
            })
            .transpose()?;
        let max_turns = overrides
            .max_turns
            .or(env_max_turns)
            .or(file.agent.max_turns)
            .unwrap_or(DEFAULT_MAX_TURNS);
        if max_turns == 0 {
            return Err(AgentError::Configuration(
                "max_turns must be at least 1".into(),
            ));
        }

        Ok(Self {
            model,
            profile_url,
            max_turns,
            temperature: overrides.temperature.or(file.model.temperature),
            max_tokens: file.model.max_tokens,
        })
    }

    /// Generation settings derived from the config.
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings::builder()
            .maybe_temperature(self.temperature)
            .maybe_max_tokens(self.max_tokens)
            .build()
    }
}
