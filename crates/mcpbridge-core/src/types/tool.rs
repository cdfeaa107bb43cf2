//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool descriptor as advertised by the tool server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (function name), unique within a catalog
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl Tool {
    /// Create a new tool definition with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: serde_json::json!({ "type": "object", "properties": {} }),
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// Tool call issued by the model
///
/// `arguments` keeps the wire encoding (a JSON document as text). Payloads
/// that get this far malformed become a tool-level failure in the invoker;
/// the genai backends reject unparseable arguments while decoding the
/// response, so with them it surfaces as a model request error instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Opaque correlation id, echoed back in the tool response
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Create a tool call from already-structured arguments
    pub fn from_value(id: impl Into<String>, name: impl Into<String>, arguments: &Value) -> Self {
        Self::new(id, name, arguments.to_string())
    }
}

/// Kind of a tool-level failure
///
/// None of these abort a query; they are rendered as text for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolFailureKind {
    /// The tool is not in the catalog or the server does not know it
    ToolNotFound,
    /// The tool ran and reported a failure
    ToolExecution,
    /// The arguments were not a JSON object
    ArgumentParse,
    /// The arguments did not satisfy the advertised schema
    InvalidArguments,
    /// The channel to the tool server broke during the call
    Transport,
}

impl std::fmt::Display for ToolFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ToolFailureKind::ToolNotFound => "tool not found",
            ToolFailureKind::ToolExecution => "tool execution error",
            ToolFailureKind::ArgumentParse => "argument parse error",
            ToolFailureKind::InvalidArguments => "invalid arguments",
            ToolFailureKind::Transport => "transport error",
        };
        f.write_str(s)
    }
}

/// Outcome of a single tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ToolOutcome {
    Success { content: String },
    Failure { kind: ToolFailureKind, detail: String },
}

/// Tool result to send back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is responding to
    #[serde(rename = "callId")]
    pub call_id: String,
    /// Name of the tool that was called
    pub name: String,
    /// What happened
    pub outcome: ToolOutcome,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(call_id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            outcome: ToolOutcome::Success {
                content: content.into(),
            },
        }
    }

    /// Create a failed tool result
    pub fn failure(
        call_id: impl Into<String>,
        name: impl Into<String>,
        kind: ToolFailureKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            outcome: ToolOutcome::Failure {
                kind,
                detail: detail.into(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Failure { .. })
    }

    pub fn failure_kind(&self) -> Option<ToolFailureKind> {
        match &self.outcome {
            ToolOutcome::Failure { kind, .. } => Some(*kind),
            ToolOutcome::Success { .. } => None,
        }
    }

    /// Text placed in the tool-role message for the model
    pub fn content_text(&self) -> String {
        match &self.outcome {
            ToolOutcome::Success { content } => content.clone(),
            ToolOutcome::Failure { kind, detail } => format!("Error ({}): {}", kind, detail),
        }
    }
}

/// Tool choice policy for requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to use tools
    Auto,
}

impl Default for ToolChoice {
    fn default() -> Self {
        ToolChoice::Auto
    }
}
