//! Configuration structure and defaults

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::DEFAULT_MAX_OUTPUT_TOKENS;
use super::traits::{ConfigError, ConfigResult};

/// Environment variable overriding `model.provider`
pub const ENV_PROVIDER: &str = "MCPBRIDGE_PROVIDER";
/// Environment variable overriding `model.model`
pub const ENV_MODEL: &str = "MCPBRIDGE_MODEL";
/// Environment variable overriding `model.api_base`
pub const ENV_API_BASE: &str = "MCPBRIDGE_API_BASE";

/// Top-level configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Model backend settings
    #[serde(default)]
    pub model: ModelSettings,

    /// Script extension -> launcher command
    #[serde(default = "default_launchers")]
    pub launchers: BTreeMap<String, LauncherSpec>,

    /// Extra environment for the tool process
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Tool server session limits
    #[serde(default)]
    pub session: SessionSettings,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            model: ModelSettings::default(),
            launchers: default_launchers(),
            env: BTreeMap::new(),
            session: SessionSettings::default(),
        }
    }
}

/// Settings for the model backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Provider identifier (openai, azure, anthropic, ollama, mock, ...)
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier as used by the provider's API
    #[serde(default = "default_model")]
    pub model: String,
    /// Custom API base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Response length ceiling for every completion
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional system prompt placed at the start of the history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_base: None,
            api_key_env: None,
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
            system_prompt: None,
        }
    }
}

impl ModelSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Limits on the conversation with the tool server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Seconds allowed for spawn plus the `initialize` handshake
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a single `tools/call`
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

impl SessionSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}

/// How to start a tool server script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherSpec {
    /// Program to run (looked up on PATH)
    pub command: String,
    /// Arguments placed before the script path
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl LauncherSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_call_timeout_secs() -> u64 {
    120
}

/// Launchers known out of the box
pub fn default_launchers() -> BTreeMap<String, LauncherSpec> {
    let mut launchers = BTreeMap::new();
    launchers.insert("py".to_string(), LauncherSpec::new("python"));
    launchers.insert("js".to_string(), LauncherSpec::new("node"));
    launchers.insert("mjs".to_string(), LauncherSpec::new("node"));
    launchers
}

impl BridgeConfig {
    /// Apply overrides from a variable lookup (normally the process env)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup(ENV_PROVIDER).filter(|v| !v.is_empty()) {
            self.model.provider = provider;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.is_empty()) {
            self.model.model = model;
        }
        if let Some(api_base) = lookup(ENV_API_BASE).filter(|v| !v.is_empty()) {
            self.model.api_base = Some(api_base);
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Normalize launcher keys (lowercase, no leading dot) and check values
    pub fn validate(mut self) -> ConfigResult<Self> {
        if self.model.provider.trim().is_empty() {
            return Err(ConfigError::Invalid("model.provider must not be empty".into()));
        }
        if self.model.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model.model must not be empty".into()));
        }
        if self.model.max_output_tokens == 0 {
            return Err(ConfigError::Invalid(
                "model.max_output_tokens must be greater than zero".into(),
            ));
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::Invalid("model.timeout_secs must be greater than zero".into()));
        }
        if self.session.connect_timeout_secs == 0 || self.session.call_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "session timeouts must be greater than zero".into(),
            ));
        }

        let mut launchers = BTreeMap::new();
        for (ext, spec) in self.launchers {
            let key = ext.trim_start_matches('.').to_lowercase();
            if key.is_empty() {
                return Err(ConfigError::Invalid("launcher extension must not be empty".into()));
            }
            if spec.command.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "launcher for '.{}' has an empty command",
                    key
                )));
            }
            launchers.insert(key, spec);
        }
        self.launchers = launchers;

        Ok(self)
    }
}
