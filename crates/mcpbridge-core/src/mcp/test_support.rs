//! In-process transport fake for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::types::Tool;
use super::error::{McpError, McpResult};
use super::transport::ToolTransport;

/// Shared view into what a `FakeTransport` saw
#[derive(Default)]
pub struct FakeProbe {
    pub closes: AtomicUsize,
    calls: Mutex<Vec<String>>,
    tools: Mutex<Vec<Tool>>,
}

impl FakeProbe {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn set_tools(&self, tools: Vec<Tool>) {
        if let Ok(mut guard) = self.tools.lock() {
            *guard = tools;
        }
    }
}

/// Serves `echo` (returns `message`) and `fail` (always errors)
pub struct FakeTransport {
    probe: Arc<FakeProbe>,
    fail_discovery: bool,
}

impl FakeTransport {
    pub fn new() -> (Self, Arc<FakeProbe>) {
        let probe = Arc::new(FakeProbe::default());
        probe.set_tools(vec![
            Tool::new("echo", "Return the exact message you send in.").with_schema(json!({
                "type": "object",
                "properties": { "message": { "type": "string" } },
                "required": ["message"]
            })),
            Tool::new("fail", "Always fails"),
        ]);
        (
            Self {
                probe: Arc::clone(&probe),
                fail_discovery: false,
            },
            probe,
        )
    }

    pub fn failing_discovery() -> (Self, Arc<FakeProbe>) {
        let (mut fake, probe) = Self::new();
        fake.fail_discovery = true;
        (fake, probe)
    }
}

#[async_trait]
impl ToolTransport for FakeTransport {
    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        if self.fail_discovery {
            return Err(McpError::transport("list_tools: connection closed"));
        }
        Ok(self.probe.tools.lock().map(|t| t.clone()).unwrap_or_default())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<String> {
        if let Ok(mut calls) = self.probe.calls.lock() {
            calls.push(name.to_string());
        }
        match name {
            "echo" => Ok(arguments
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()),
            "fail" => Err(McpError::tool_execution(name, "boom")),
            other => Err(McpError::ToolNotFound(other.to_string())),
        }
    }

    async fn close(&mut self) -> McpResult<()> {
        self.probe.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
