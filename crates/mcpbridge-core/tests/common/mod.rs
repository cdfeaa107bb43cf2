//! Shared fixtures: an in-process demo tool server and a shareable mock model

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use mcpbridge_core::providers::ProviderResult;
use mcpbridge_core::{
    Completion, CompletionRequest, Logger, McpError, McpResult, MockProvider, MockResponse,
    NoOpLogger, Orchestrator, Provider, Tool, ToolSession, ToolTransport,
};

// ---------------------------------------------------------------------------
// Demo tool server
// ---------------------------------------------------------------------------

/// Records what the demo server was asked to do
#[derive(Default)]
pub struct ServerLog {
    calls: Mutex<Vec<(String, Value)>>,
    pub closes: AtomicUsize,
}

impl ServerLog {
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// In-process stand-in for the demo tools server
pub struct DemoTools {
    log: Arc<ServerLog>,
}

impl DemoTools {
    pub fn new() -> (Self, Arc<ServerLog>) {
        let log = Arc::new(ServerLog::default());
        (Self { log: Arc::clone(&log) }, log)
    }

    pub fn catalog() -> Vec<Tool> {
        vec![
            Tool::new("echo", "Return the exact message you send in.").with_schema(json!({
                "type": "object",
                "properties": { "message": { "type": "string" } },
                "required": ["message"]
            })),
            Tool::new("add", "Add two numbers and return the sum as a string.").with_schema(json!({
                "type": "object",
                "properties": {
                    "a": { "type": "number" },
                    "b": { "type": "number" }
                },
                "required": ["a", "b"]
            })),
            Tool::new("dice_roll", "Roll an n-sided die (default 6) and return the result.")
                .with_schema(json!({
                    "type": "object",
                    "properties": { "sides": { "type": "integer", "default": 6 } }
                })),
            Tool::new("convert_temperature", "Convert between Celsius and Fahrenheit.")
                .with_schema(json!({
                    "type": "object",
                    "properties": {
                        "value": { "type": "number" },
                        "unit": { "type": "string" }
                    },
                    "required": ["value", "unit"]
                })),
            Tool::new("word_count", "Return how many words are in the provided text.")
                .with_schema(json!({
                    "type": "object",
                    "properties": { "text": { "type": "string" } },
                    "required": ["text"]
                })),
        ]
    }

    fn run(name: &str, args: &Map<String, Value>) -> McpResult<String> {
        let num = |key: &str| args.get(key).and_then(Value::as_f64).unwrap_or_default();
        let text = |key: &str| {
            args.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        match name {
            "echo" => Ok(text("message")),
            "add" => {
                let (a, b) = (num("a"), num("b"));
                Ok(format!("{:?} + {:?} = {:?}", a, b, a + b))
            }
            "dice_roll" => {
                let sides = args.get("sides").and_then(Value::as_i64).unwrap_or(6);
                if sides < 1 {
                    return Err(McpError::tool_execution(name, "sides must be positive"));
                }
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.subsec_nanos() as i64)
                    .unwrap_or_default();
                let result = nanos % sides + 1;
                Ok(format!("🎲 Rolled a {}-sided die: {}", sides, result))
            }
            "convert_temperature" => {
                let value = num("value");
                match text("unit").trim().to_uppercase().as_str() {
                    "C" => Ok(format!("{:.2} °C is {:.2} °F", value, value * 9.0 / 5.0 + 32.0)),
                    "F" => Ok(format!("{:.2} °F is {:.2} °C", value, (value - 32.0) * 5.0 / 9.0)),
                    _ => Ok("Unit must be 'C' or 'F'.".to_string()),
                }
            }
            "word_count" => {
                let count = text("text").split_whitespace().count();
                let plural = if count == 1 { "" } else { "s" };
                Ok(format!("The text contains {} word{}.", count, plural))
            }
            other => Err(McpError::ToolNotFound(other.to_string())),
        }
    }
}

#[async_trait]
impl ToolTransport for DemoTools {
    async fn list_tools(&self) -> McpResult<Vec<Tool>> {
        Ok(Self::catalog())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<String> {
        self.log
            .calls
            .lock()
            .unwrap()
            .push((name.to_string(), Value::Object(arguments.clone())));
        Self::run(name, &arguments)
    }

    async fn close(&mut self) -> McpResult<()> {
        self.log.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn describe(&self) -> String {
        "demo-tools (in-process)".to_string()
    }
}

// ---------------------------------------------------------------------------
// Shareable mock model
// ---------------------------------------------------------------------------

/// Lets a test keep a handle on the mock after the orchestrator takes ownership
pub struct SharedMock(pub Arc<MockProvider>);

#[async_trait]
impl Provider for SharedMock {
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<Completion> {
        self.0.complete(request).await
    }
}

pub fn logger() -> Arc<dyn Logger> {
    Arc::new(NoOpLogger)
}

pub async fn demo_session() -> (ToolSession, Arc<ServerLog>) {
    let (tools, log) = DemoTools::new();
    let session = ToolSession::open(Box::new(tools), logger())
        .await
        .expect("demo session opens");
    (session, log)
}

/// Orchestrator over the demo tools, driven by a scripted model
pub async fn scripted_orchestrator(
    responses: Vec<MockResponse>,
) -> (Orchestrator, Arc<MockProvider>, Arc<ServerLog>) {
    let (session, log) = demo_session().await;
    let model = Arc::new(MockProvider::scripted(responses));
    let orchestrator = Orchestrator::new(session, Box::new(SharedMock(Arc::clone(&model))), logger());
    (orchestrator, model, log)
}
