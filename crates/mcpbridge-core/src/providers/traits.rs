//! Provider trait definition

use std::time::Duration;

use async_trait::async_trait;

use crate::config::ModelSettings;
use crate::types::{Completion, CompletionRequest};
use super::error::ProviderResult;

/// Model configuration for provider requests
#[derive(Debug, Clone)]
pub struct ProviderModelConfig {
    /// Model identifier as used by the provider's API
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Custom API base URL
    pub api_base: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ProviderModelConfig {
    /// Create a new model config
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key_env: None,
            api_base: None,
            timeout: Duration::from_secs(120),
        }
    }

    /// Set the API key variable name
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = Some(name.into());
        self
    }

    /// Set the API base URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&ModelSettings> for ProviderModelConfig {
    fn from(settings: &ModelSettings) -> Self {
        Self {
            model: settings.model.clone(),
            api_key_env: settings.api_key_env.clone(),
            api_base: settings.api_base.clone(),
            timeout: settings.timeout(),
        }
    }
}

/// The model oracle: one request in, the top choice out
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider name (e.g., "openai", "mock")
    fn name(&self) -> &str;

    /// Request a completion over the full history
    async fn complete(&self, request: CompletionRequest) -> ProviderResult<Completion>;
}
