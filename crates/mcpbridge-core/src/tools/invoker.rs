//! Dispatch of model-issued tool calls to the session
//!
//! Every failure is folded into a `ToolResult` so one bad call never
//! aborts the batch; the model sees the failure text in its follow-up.

use std::sync::Arc;

use crate::logging::Logger;
use crate::mcp::ToolSession;
use crate::types::{parse_arguments, ToolCall, ToolFailureKind, ToolResult};
use super::validation::validate_arguments;

/// Maps a tool call to a session call and normalizes the outcome
pub struct ToolInvoker {
    logger: Arc<dyn Logger>,
    /// Check arguments against the advertised schema before dispatch
    validate: bool,
}

impl ToolInvoker {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            validate: true,
        }
    }

    /// Skip local schema checks and leave validation to the tool server
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Invoke one tool call
    pub async fn invoke(&self, session: &ToolSession, call: &ToolCall) -> ToolResult {
        let arguments = match parse_arguments(&call.arguments) {
            Ok(arguments) => arguments,
            Err(e) => {
                return self.fail(call, ToolFailureKind::ArgumentParse, e.to_string());
            }
        };

        let Some(tool) = session.catalog().get(&call.name) else {
            return self.fail(
                call,
                ToolFailureKind::ToolNotFound,
                format!("unknown tool '{}'", call.name),
            );
        };

        if self.validate {
            if let Err(message) = validate_arguments(&arguments, &tool.input_schema) {
                return self.fail(call, ToolFailureKind::InvalidArguments, message);
            }
        }

        match session.call_tool(&call.name, &arguments).await {
            Ok(content) => {
                self.logger.debug(&format!(
                    "[ToolInvoker] {} ({}) succeeded",
                    call.name, call.id
                ));
                ToolResult::success(&call.id, &call.name, content)
            }
            Err(e) => self.fail(call, e.failure_kind(), e.detail()),
        }
    }

    fn fail(&self, call: &ToolCall, kind: ToolFailureKind, detail: String) -> ToolResult {
        self.logger.warn(&format!(
            "[ToolInvoker] {} ({}) failed: {}: {}",
            call.name, call.id, kind, detail
        ));
        ToolResult::failure(&call.id, &call.name, kind, detail)
    }
}
