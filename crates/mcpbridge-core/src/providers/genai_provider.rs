//! GenaiProvider - Unified provider using the genai crate
//!
//! Handles the providers genai speaks natively (OpenAI, Anthropic, Gemini, etc.)
//! as well as OpenAI-compatible endpoints (Azure, OpenRouter, Mistral) via
//! the ServiceTargetResolver. Requests are single-shot and never retried.

use std::sync::Arc;

use async_trait::async_trait;
use genai::Client;

use crate::logging::Logger;
use crate::types::{Completion, CompletionRequest};

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_response, is_genai_supported, to_genai_options, to_genai_request,
};
use super::traits::{Provider, ProviderModelConfig};

/// Unified provider using genai for all supported LLM APIs
pub struct GenaiProvider {
    /// Provider identifier
    provider_id: String,
    /// Model and endpoint settings
    config: ProviderModelConfig,
    client: Client,
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    /// Create a new GenaiProvider
    ///
    /// Fails if the provider id is unknown or its required settings are missing.
    pub fn new(
        provider_id: impl Into<String>,
        config: ProviderModelConfig,
        logger: Arc<dyn Logger>,
    ) -> ProviderResult<Self> {
        let provider_id = provider_id.into();
        let client = create_client(&provider_id, &config)?;

        logger.debug(&format!(
            "[GenaiProvider] Created provider={}, model={}, timeout={}s",
            provider_id,
            config.model,
            config.timeout.as_secs()
        ));

        Ok(Self {
            provider_id,
            config,
            client,
            logger,
        })
    }

    /// Check if this provider can handle the given provider ID
    pub fn supports(provider_id: &str) -> bool {
        is_genai_supported(provider_id)
    }

    /// Model used for every request
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Provider for GenaiProvider {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<Completion> {
        self.logger.info(&format!(
            "[GenaiProvider] complete called: provider={}, model={}, messages={}, tools={}",
            self.provider_id,
            self.config.model,
            request.messages.len(),
            request.tools.as_ref().map_or(0, Vec::len)
        ));

        let chat_req = to_genai_request(&request);
        let options = to_genai_options(&request);
        let start = std::time::Instant::now();

        let response = match tokio::time::timeout(
            self.config.timeout,
            self.client
                .exec_chat(&self.config.model, chat_req, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                self.logger
                    .error(&format!("[GenaiProvider] {} API error: {}", self.provider_id, e));
                return Err(ProviderError::api_error(&self.provider_id, e.to_string()));
            }
            Err(_) => {
                self.logger.error(&format!(
                    "[GenaiProvider] {} request timed out after {}s",
                    self.provider_id,
                    self.config.timeout.as_secs()
                ));
                return Err(ProviderError::Timeout {
                    provider: self.provider_id.clone(),
                    seconds: self.config.timeout.as_secs(),
                });
            }
        };

        let completion = from_genai_response(&response);

        self.logger.debug(&format!(
            "[GenaiProvider] Completed in {:.2}s: text={} chars, tool_calls={}",
            start.elapsed().as_secs_f64(),
            completion.content.as_ref().map_or(0, String::len),
            completion.tool_calls.len()
        ));

        Ok(completion)
    }
}

impl std::fmt::Debug for GenaiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiProvider")
            .field("provider", &self.provider_id)
            .field("model", &self.config.model)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
