//! Transport abstraction over a tool server connection

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::types::Tool;
use super::error::McpResult;

/// A handshaken channel to a tool server
///
/// `McpClient` speaks MCP to a child process; tests plug in in-process
/// fakes. Calls are issued one at a time by the session owner.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Fetch every tool the server advertises, in server order
    async fn list_tools(&self) -> McpResult<Vec<Tool>>;

    /// Call a tool and return its output rendered as text
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<String>;

    /// Shut the channel down
    ///
    /// Called at most once by `ToolSession`.
    async fn close(&mut self) -> McpResult<()>;

    /// Short description for log output
    fn describe(&self) -> String {
        "tool server".to_string()
    }
}
