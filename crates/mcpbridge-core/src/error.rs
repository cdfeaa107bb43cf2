//! Crate-level error type

use thiserror::Error;

use crate::config::ConfigError;
use crate::mcp::McpError;
use crate::providers::ProviderError;

/// Any failure that aborts startup or a single query
///
/// Tool-level failures never show up here; they are folded into
/// `ToolResult`s by the invoker.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Mcp(#[from] McpError),

    #[error("Model request failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
