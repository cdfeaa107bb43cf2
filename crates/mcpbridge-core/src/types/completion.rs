//! Completion request/response types for the model oracle

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::ChatMessage;
use super::tool::{Tool, ToolCall, ToolChoice};

/// Default response length ceiling, in tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1000;

/// Function declaration offered to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    /// JSON Schema of the function parameters
    pub parameters: Value,
}

impl From<&Tool> for ToolDeclaration {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.input_schema.clone(),
        }
    }
}

/// A single request to the model oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Full ordered history
    pub messages: Vec<ChatMessage>,
    /// Function declarations; absent when tools are not offered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDeclaration>>,
    /// Tool choice policy; only set together with `tools`
    #[serde(rename = "toolChoice", skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoice>,
    /// Response length ceiling
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

impl CompletionRequest {
    /// Create a request without tools
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            tools: None,
            tool_choice: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    /// Offer tools with the "auto" policy
    pub fn with_tools(mut self, tools: Vec<ToolDeclaration>) -> Self {
        self.tools = Some(tools);
        self.tool_choice = Some(ToolChoice::Auto);
        self
    }

    /// Set the response length ceiling
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn offers_tools(&self) -> bool {
        self.tools.is_some()
    }
}

/// The oracle's top choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Visible text, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Tool calls in the order the model emitted them
    #[serde(rename = "toolCalls", default)]
    pub tool_calls: Vec<ToolCall>,
}

impl Completion {
    /// A text-only completion
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A completion requesting tool calls
    pub fn with_tool_calls(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self { content, tool_calls }
    }

    /// Content, if present and not empty
    pub fn visible_text(&self) -> Option<&str> {
        self.content.as_deref().filter(|s| !s.is_empty())
    }
}
