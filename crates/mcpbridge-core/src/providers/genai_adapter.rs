//! Adapter between mcpbridge types and genai types
//!
//! Conversions for history, tool declarations and options, plus client
//! creation with a service-target resolver so that the configured provider
//! (not the model name) decides the adapter, endpoint and key variable.

use genai::adapter::AdapterKind;
use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatRequest, ChatResponse,
    MessageContent as GenaiContent, Tool as GenaiTool, ToolCall as GenaiToolCall,
    ToolResponse as GenaiToolResponse,
};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{Client, ModelIden, ServiceTarget};
use serde_json::Value;

use crate::types::{
    ChatMessage, Completion, CompletionRequest, MessageRole, ToolCall, ToolDeclaration,
};

use super::error::{ProviderError, ProviderResult};
use super::traits::ProviderModelConfig;

// ============================================================================
// Message Conversion: mcpbridge -> genai
// ============================================================================

/// Convert a wire-encoded argument string into the JSON genai expects
///
/// Text that is not valid JSON is passed through as a JSON string.
fn to_genai_arguments(arguments: &str) -> Value {
    serde_json::from_str(arguments).unwrap_or_else(|_| Value::String(arguments.to_string()))
}

/// Convert mcpbridge ToolCall to genai ToolCall
pub fn to_genai_tool_call(call: &ToolCall) -> GenaiToolCall {
    GenaiToolCall {
        call_id: call.id.clone(),
        fn_name: call.name.clone(),
        fn_arguments: to_genai_arguments(&call.arguments),
    }
}

/// Convert mcpbridge ChatMessage to genai ChatMessage
pub fn to_genai_message(msg: &ChatMessage) -> GenaiMessage {
    let text = msg.content.clone().unwrap_or_default();

    match msg.role {
        MessageRole::System => GenaiMessage::system(text),
        MessageRole::User => GenaiMessage::user(text),
        MessageRole::Assistant => match &msg.tool_calls {
            Some(calls) if !calls.is_empty() => {
                let genai_calls = calls.iter().map(to_genai_tool_call).collect();
                GenaiMessage::assistant(GenaiContent::from_tool_calls(genai_calls))
            }
            _ => GenaiMessage::assistant(text),
        },
        MessageRole::Tool => GenaiToolResponse {
            call_id: msg.tool_call_id.clone().unwrap_or_default(),
            content: text,
        }
        .into(),
    }
}

/// Convert the history to genai messages
pub fn to_genai_messages(messages: &[ChatMessage]) -> Vec<GenaiMessage> {
    messages.iter().map(to_genai_message).collect()
}

// ============================================================================
// Tool / Request Conversion: mcpbridge -> genai
// ============================================================================

/// Convert a function declaration to a genai Tool
pub fn to_genai_tool(decl: &ToolDeclaration) -> GenaiTool {
    GenaiTool::new(&decl.name)
        .with_description(&decl.description)
        .with_schema(decl.parameters.clone())
}

/// Build the genai request; tools are attached only when offered
///
/// genai has no explicit tool-choice knob; offering tools without forcing
/// one is the "auto" policy.
pub fn to_genai_request(request: &CompletionRequest) -> ChatRequest {
    let chat_req = ChatRequest::new(to_genai_messages(&request.messages));
    match &request.tools {
        Some(tools) if !tools.is_empty() => {
            chat_req.with_tools(tools.iter().map(to_genai_tool).collect::<Vec<_>>())
        }
        _ => chat_req,
    }
}

/// Convert request settings to genai options
pub fn to_genai_options(request: &CompletionRequest) -> GenaiOptions {
    GenaiOptions::default().with_max_tokens(request.max_output_tokens)
}

// ============================================================================
// Response Conversion: genai -> mcpbridge
// ============================================================================

/// Convert genai ToolCall to mcpbridge ToolCall, keeping the wire form
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolCall {
    let arguments = match &tc.fn_arguments {
        Value::String(raw) => raw.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    ToolCall::new(tc.call_id.clone(), tc.fn_name.clone(), arguments)
}

/// Take the top choice from a genai response
pub fn from_genai_response(response: &ChatResponse) -> Completion {
    let content = response
        .first_text()
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string());

    let tool_calls = response
        .tool_calls()
        .into_iter()
        .map(from_genai_tool_call)
        .collect();

    Completion::with_tool_calls(content, tool_calls)
}

// ============================================================================
// Provider Resolution
// ============================================================================

/// How a provider id maps onto genai
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderRoute {
    /// genai adapter speaking the provider's protocol
    pub adapter: AdapterKind,
    /// Endpoint used when none is configured
    pub default_api_base: Option<&'static str>,
    /// Whether an `api_base` must be configured
    pub requires_api_base: bool,
    /// Key variable used when none is configured
    pub default_key_env: Option<&'static str>,
}

impl ProviderRoute {
    const fn native(adapter: AdapterKind) -> Self {
        Self {
            adapter,
            default_api_base: None,
            requires_api_base: false,
            default_key_env: None,
        }
    }

    const fn openai_compatible(
        default_api_base: Option<&'static str>,
        default_key_env: Option<&'static str>,
    ) -> Self {
        Self {
            adapter: AdapterKind::OpenAI,
            default_api_base,
            requires_api_base: default_api_base.is_none(),
            default_key_env,
        }
    }
}

/// Resolve a provider id, or `None` if unsupported
pub fn provider_route(provider: &str) -> Option<ProviderRoute> {
    let route = match provider.to_lowercase().as_str() {
        "openai" => ProviderRoute::native(AdapterKind::OpenAI),
        "anthropic" => ProviderRoute::native(AdapterKind::Anthropic),
        "gemini" | "google" => ProviderRoute::native(AdapterKind::Gemini),
        "ollama" => ProviderRoute::native(AdapterKind::Ollama),
        "groq" => ProviderRoute::native(AdapterKind::Groq),
        "xai" => ProviderRoute::native(AdapterKind::Xai),
        "deepseek" => ProviderRoute::native(AdapterKind::DeepSeek),
        "cohere" => ProviderRoute::native(AdapterKind::Cohere),
        // OpenAI-compatible endpoints
        "azure" => ProviderRoute::openai_compatible(None, Some("AZURE_OPENAI_API_KEY")),
        "openrouter" => ProviderRoute::openai_compatible(
            Some("https://openrouter.ai/api/v1/"),
            Some("OPENROUTER_API_KEY"),
        ),
        "mistral" => ProviderRoute::openai_compatible(
            Some("https://api.mistral.ai/v1/"),
            Some("MISTRAL_API_KEY"),
        ),
        "openai-compatible" | "custom" => ProviderRoute::openai_compatible(None, None),
        _ => return None,
    };
    Some(route)
}

/// Check if a provider can be handled by genai (native or via OpenAI-compat)
pub fn is_genai_supported(provider: &str) -> bool {
    provider_route(provider).is_some()
}

/// genai joins paths onto the endpoint, so it must end with a slash
fn normalize_api_base(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

// ============================================================================
// Client Creation
// ============================================================================

/// Create a genai Client routed to the configured provider
///
/// Auth reads the configured key variable (or the route's default); the
/// endpoint is the configured `api_base` (or the route's default).
pub fn create_client(provider: &str, config: &ProviderModelConfig) -> ProviderResult<Client> {
    let route = provider_route(provider).ok_or_else(|| {
        ProviderError::Configuration(format!("unsupported provider '{}'", provider))
    })?;

    let api_base = config
        .api_base
        .as_deref()
        .or(route.default_api_base)
        .map(normalize_api_base);

    if route.requires_api_base && api_base.is_none() {
        return Err(ProviderError::Configuration(format!(
            "provider '{}' requires model.api_base",
            provider
        )));
    }

    let key_env = config
        .api_key_env
        .clone()
        .or_else(|| route.default_key_env.map(str::to_string));
    let adapter = route.adapter;

    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let ServiceTarget { endpoint, auth, model } = target;

            let endpoint = match &api_base {
                Some(base) => Endpoint::from_owned(base.clone()),
                None => endpoint,
            };

            let auth = match &key_env {
                Some(name) => AuthData::from_env(name.clone()),
                None => auth,
            };

            Ok(ServiceTarget {
                endpoint,
                auth,
                model: ModelIden::new(adapter, model.model_name),
            })
        },
    );

    Ok(Client::builder()
        .with_service_target_resolver(target_resolver)
        .build())
}
