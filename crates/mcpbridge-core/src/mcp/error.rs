//! MCP session errors

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ToolFailureKind;

/// Errors from the transport session to the tool server
#[derive(Error, Debug)]
pub enum McpError {
    /// The script extension has no launcher; nothing was spawned
    #[error("Unsupported server script {path:?}: expected one of {supported}")]
    UnsupportedScriptKind { path: PathBuf, supported: String },

    #[error("Failed to start tool server: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Session is closed")]
    Closed,

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool '{tool}' failed: {message}")]
    ToolExecution { tool: String, message: String },
}

pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn tool_execution(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Kind used when this error becomes a tool outcome
    pub fn failure_kind(&self) -> ToolFailureKind {
        match self {
            Self::ToolNotFound(_) => ToolFailureKind::ToolNotFound,
            Self::ToolExecution { .. } => ToolFailureKind::ToolExecution,
            _ => ToolFailureKind::Transport,
        }
    }

    /// Text shown to the model and the user for this failure
    pub fn detail(&self) -> String {
        match self {
            Self::ToolExecution { message, .. } => message.clone(),
            Self::ToolNotFound(name) => format!("unknown tool '{}'", name),
            other => other.to_string(),
        }
    }
}
