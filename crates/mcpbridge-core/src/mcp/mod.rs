//! MCP (Model Context Protocol) transport session
//!
//! Uses the official rmcp SDK to talk to a tool server spawned as a child
//! process over its standard input/output.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcpbridge_core::mcp::ToolSession;
//!
//! let mut session = ToolSession::connect(Path::new("demo_tools.py"), &config, logger).await?;
//! println!("{:?}", session.catalog().names());
//!
//! let args = parse_arguments(r#"{"message": "hello"}"#)?;
//! let text = session.call_tool("echo", &args).await?;
//!
//! session.close().await?;
//! ```

mod error;
mod launcher;
mod transport;
mod client;
mod session;
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{McpError, McpResult};
pub use launcher::LaunchPlan;
pub use transport::ToolTransport;
pub use client::McpClient;
pub use session::{SessionState, ToolSession};
