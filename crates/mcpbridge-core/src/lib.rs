//! MCP Bridge Core
//!
//! Lets a language model call the tools of an MCP server that runs as a
//! child process over stdio. A query goes through at most two model
//! rounds: one that may request tool calls, and a follow-up over the tool
//! results that may not.
//!
//! ## Components
//!
//! - [`mcp::ToolSession`]: spawns the server, handshakes, discovers tools
//! - [`tools::ToolCatalog`] / [`tools::ToolInvoker`]: lookup, argument
//!   validation and dispatch, with failures folded into results
//! - [`conversation::ConversationEngine`]: history and completion requests
//! - [`providers::Provider`]: the model oracle (genai backends, mock)
//! - [`orchestrator::Orchestrator`]: the per-query state machine
//!
//! ```rust,ignore
//! use mcpbridge_core::{create_provider, BridgeConfig, Orchestrator, ToolSession, TracingLogger};
//!
//! let config = BridgeConfig::default();
//! let logger = Arc::new(TracingLogger::new());
//! let session = ToolSession::connect(Path::new("tools.py"), &config, logger.clone()).await?;
//! let provider = create_provider(&config.model, logger.clone())?;
//!
//! let mut orchestrator = Orchestrator::with_settings(session, provider, &config.model, logger);
//! let outcome = orchestrator.process_query("roll a 6 sided die").await?;
//! println!("{}", outcome.text);
//! orchestrator.shutdown().await?;
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod providers;
pub mod tools;
pub mod mcp;
pub mod conversation;
pub mod orchestrator;
pub mod error;

// Re-export commonly used types
pub use types::{
    ChatMessage, MessageRole,
    Tool, ToolCall, ToolChoice, ToolResult, ToolOutcome, ToolFailureKind,
    ToolValue, ToolArguments, parse_arguments, encode_arguments,
    Completion, CompletionRequest, ToolDeclaration,
};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{
    BridgeConfig, ConfigError, ConfigProvider, FileConfigProvider, MemoryConfigProvider,
    ModelSettings, SessionSettings,
};

pub use providers::{create_provider, MockProvider, MockResponse, Provider, ProviderError};

pub use tools::{ToolCatalog, ToolInvoker};

pub use mcp::{McpClient, McpError, McpResult, SessionState, ToolSession, ToolTransport};

pub use conversation::ConversationEngine;
pub use orchestrator::{Orchestrator, QueryOutcome, QueryState};

pub use error::{BridgeError, Result};
