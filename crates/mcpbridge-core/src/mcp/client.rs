//! MCP client using the official rmcp SDK
//!
//! Spawns the tool server as a child process and speaks MCP over its
//! standard input/output.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Content,
        Implementation, ResourceContents,
    },
    service::{RunningService, ServiceError},
    transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use serde_json::{Map, Value};

use crate::config::SessionSettings;
use crate::logging::Logger;
use crate::types::Tool;
use super::error::{McpError, McpResult};
use super::launcher::LaunchPlan;
use super::transport::ToolTransport;

/// JSON-RPC "method not found"
const METHOD_NOT_FOUND: i32 = -32601;

/// MCP client connected to a tool server child process
pub struct McpClient {
    /// The underlying rmcp running service; `None` once closed
    client: Option<RunningService<RoleClient, ClientInfo>>,
    /// Command line, for log output
    command_line: String,
    /// Ceiling on one `tools/call` round trip
    call_timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl McpClient {
    /// Spawn the tool server and perform the `initialize` handshake
    ///
    /// A server that does not finish the handshake within the connect
    /// timeout is killed and reported as `InitializationFailed`.
    pub async fn spawn(
        plan: &LaunchPlan,
        settings: &SessionSettings,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        let command_line = plan.display();
        logger.info(&format!("[McpClient] Spawning tool server: {}", command_line));

        let transport = TokioChildProcess::new(plan.command())?;

        let client_info = ClientInfo {
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "mcpbridge".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let connect_timeout = settings.connect_timeout();
        let client = match tokio::time::timeout(connect_timeout, client_info.serve(transport)).await {
            Ok(Ok(client)) => client,
            Ok(Err(e)) => return Err(McpError::InitializationFailed(e.to_string())),
            Err(_) => {
                logger.error(&format!(
                    "[McpClient] No handshake from {} after {}s",
                    command_line,
                    connect_timeout.as_secs()
                ));
                return Err(McpError::InitializationFailed(format!(
                    "no initialize response within {}s",
                    connect_timeout.as_secs()
                )));
            }
        };

        if let Some(info) = client.peer_info() {
            logger.info(&format!(
                "[McpClient] Initialized with server {} {}",
                info.server_info.name, info.server_info.version
            ));
        } else {
            logger.info("[McpClient] Initialized");
        }

        Ok(Self {
            client: Some(client),
            command_line,
            call_timeout: settings.call_timeout(),
            logger,
        })
    }

    fn running(&self) -> McpResult<&RunningService<RoleClient, ClientInfo>> {
        self.client.as_ref().ok_or(McpError::Closed)
    }
}

#[async_trait]
impl ToolTransport for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        let tools = self
            .running()?
            .list_all_tools()
            .await
            .map_err(|e| map_service_error("list_tools", e))?;

        self.logger.info(&format!("[McpClient] Listed {} tools", tools.len()));

        Ok(tools.into_iter().map(from_mcp_tool).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<String> {
        self.logger.debug(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments),
            task: None,
        };

        let call = self.running()?.call_tool(params);
        let result = match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result.map_err(|e| map_call_error(name, e))?,
            Err(_) => {
                self.logger.warn(&format!("[McpClient] Tool {} timed out", name));
                return Err(McpError::transport(format!(
                    "call_tool: no response for '{}' within {}s",
                    name,
                    self.call_timeout.as_secs()
                )));
            }
        };

        render_call_result(name, result)
    }

    async fn close(&mut self) -> McpResult<()> {
        let Some(client) = self.client.take() else {
            return Ok(());
        };
        self.logger.info("[McpClient] Closing connection");
        client
            .cancel()
            .await
            .map_err(|e| McpError::transport(e.to_string()))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.command_line.clone()
    }
}

fn from_mcp_tool(tool: rmcp::model::Tool) -> Tool {
    Tool {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()).unwrap_or_default(),
        input_schema: Value::Object((*tool.input_schema).clone()),
    }
}

/// Join text blocks (and embedded text resources) with newlines
fn extract_text_content(content: &[Content]) -> Option<String> {
    let mut lines = Vec::new();
    for item in content {
        if let Some(text) = item.as_text() {
            lines.push(text.text.clone());
            continue;
        }
        if let Some(resource) = item.as_resource() {
            if let ResourceContents::TextResourceContents { text, .. } = &resource.resource {
                lines.push(text.clone());
            }
        }
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn names_unknown_tool(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("unknown tool") || (message.contains("tool") && message.contains("not found"))
}

fn render_call_result(name: &str, result: CallToolResult) -> McpResult<String> {
    let text = extract_text_content(&result.content);
    let structured = result.structured_content.as_ref().map(|v| v.to_string());

    if result.is_error.unwrap_or(false) {
        let message = text
            .or(structured)
            .unwrap_or_else(|| "tool returned an error result".to_string());
        if names_unknown_tool(&message) {
            return Err(McpError::ToolNotFound(name.to_string()));
        }
        return Err(McpError::tool_execution(name, message));
    }

    Ok(text.or(structured).unwrap_or_default())
}

fn map_call_error(name: &str, error: ServiceError) -> McpError {
    if let ServiceError::McpError(data) = &error {
        if data.code.0 == METHOD_NOT_FOUND || names_unknown_tool(&data.message) {
            return McpError::ToolNotFound(name.to_string());
        }
        return McpError::tool_execution(name, data.message.to_string());
    }
    map_service_error("call_tool", error)
}

fn map_service_error(context: &str, error: ServiceError) -> McpError {
    match error {
        ServiceError::McpError(data) => McpError::transport(format!(
            "{}: MCP error {}: {}",
            context, data.code.0, data.message
        )),
        ServiceError::TransportSend(e) => {
            McpError::transport(format!("{}: send failed: {}", context, e))
        }
        ServiceError::TransportClosed => {
            McpError::transport(format!("{}: connection closed", context))
        }
        ServiceError::UnexpectedResponse => {
            McpError::transport(format!("{}: unexpected response", context))
        }
        other => McpError::transport(format!("{}: {}", context, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_result(text: &str, is_error: bool) -> CallToolResult {
        let mut result = CallToolResult::success(vec![Content::text(text)]);
        result.is_error = Some(is_error);
        result
    }

    #[test]
    fn test_render_success_joins_text() {
        let mut result = CallToolResult::success(vec![Content::text("a"), Content::text("b")]);
        result.is_error = None;
        assert_eq!(render_call_result("echo", result).unwrap(), "a\nb");
    }

    #[test]
    fn test_render_structured_when_no_text() {
        let mut result = CallToolResult::success(vec![]);
        result.structured_content = Some(json!({ "sum": 3 }));
        assert_eq!(render_call_result("add", result).unwrap(), r#"{"sum":3}"#);
    }

    #[test]
    fn test_render_error_results() {
        let err = render_call_result("convert", text_result("division by zero", true)).unwrap_err();
        assert!(matches!(err, McpError::ToolExecution { ref message, .. } if message == "division by zero"));

        let err = render_call_result("nope", text_result("Unknown tool: nope", true)).unwrap_err();
        assert!(matches!(err, McpError::ToolNotFound(ref name) if name == "nope"));
    }

    #[test]
    fn test_unknown_tool_detection() {
        assert!(names_unknown_tool("Unknown tool: dice"));
        assert!(names_unknown_tool("Tool 'dice' not found"));
        assert!(!names_unknown_tool("file not found"));
    }

    #[test]
    fn test_map_transport_errors() {
        let err = map_call_error("echo", ServiceError::TransportClosed);
        assert!(matches!(err, McpError::Transport(ref m) if m.contains("closed")));
    }
}
