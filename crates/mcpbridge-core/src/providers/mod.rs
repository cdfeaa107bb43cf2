//! LLM Provider implementations
//!
//! The model is treated as a request/response oracle behind the
//! [`Provider`] trait: one completion request over the full history in,
//! the top choice out.
//!
//! ## Architecture
//!
//! Real backends go through the `genai` crate, which handles the
//! provider-specific protocols and tool calling. Providers not native to
//! genai (Azure, OpenRouter, Mistral, custom endpoints) are routed through
//! genai's `ServiceTargetResolver` using the OpenAI-compatible protocol.
//!
//! The `MockProvider` replays scripted completions for tests and offline runs.

mod traits;
mod error;
mod genai_adapter;
mod genai_provider;
mod mock;

pub use traits::{Provider, ProviderModelConfig};
pub use error::{ProviderError, ProviderResult};

pub use genai_provider::GenaiProvider;
pub use genai_adapter::{is_genai_supported, provider_route, ProviderRoute};

pub use mock::{MockProvider, MockResponse};

use std::sync::Arc;

use crate::config::ModelSettings;
use crate::logging::Logger;

/// Create the provider named by the settings
///
/// `mock` yields an echoing `MockProvider`; every other id must be one
/// genai can serve.
pub fn create_provider(
    settings: &ModelSettings,
    logger: Arc<dyn Logger>,
) -> ProviderResult<Box<dyn Provider>> {
    match settings.provider.to_lowercase().as_str() {
        "mock" => Ok(Box::new(MockProvider::new(logger))),
        id if GenaiProvider::supports(id) => Ok(Box::new(GenaiProvider::new(
            id,
            ProviderModelConfig::from(settings),
            logger,
        )?)),
        _ => Err(ProviderError::Configuration(format!(
            "unsupported provider '{}' (supported: {})",
            settings.provider,
            supported_providers().join(", ")
        ))),
    }
}

/// List all supported provider IDs
pub fn supported_providers() -> Vec<&'static str> {
    vec![
        // Native genai providers
        "openai",
        "anthropic",
        "gemini",
        "google",
        "ollama",
        "groq",
        "xai",
        "deepseek",
        "cohere",
        // OpenAI-compatible providers via resolver
        "azure",
        "openrouter",
        "mistral",
        "openai-compatible",
        "custom",
        // Testing
        "mock",
    ]
}
