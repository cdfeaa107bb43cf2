//! Query orchestration: at most two model rounds per user query
//!
//! ```text
//! Idle ─▶ AwaitingFirstCompletion ─┬─────────────────────────────────────────▶ Done
//!                                  └▶ ExecutingTools ─▶ AwaitingFollowUp ─────▶ Done
//! ```
//!
//! Tool calls run strictly one after another in the order the model
//! emitted them. The follow-up round never offers tools, so a query makes
//! one batch of tool calls at most.

use std::sync::Arc;

use crate::config::ModelSettings;
use crate::conversation::ConversationEngine;
use crate::error::Result;
use crate::logging::Logger;
use crate::mcp::{McpError, ToolSession};
use crate::providers::Provider;
use crate::tools::ToolInvoker;
use crate::types::{ChatMessage, ToolDeclaration, ToolResult};

/// Where the current (or last) query is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    AwaitingFirstCompletion,
    ExecutingTools,
    AwaitingFollowUp,
    Done,
}

/// Result of one processed query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Visible text: model content, tool trace lines and raw outcomes, joined by newlines
    pub text: String,
    /// Tool results in call order
    pub tool_results: Vec<ToolResult>,
    /// Model rounds used (1 or 2)
    pub rounds: u8,
}

impl QueryOutcome {
    pub fn used_tools(&self) -> bool {
        !self.tool_results.is_empty()
    }
}

/// Trace line recorded in the visible text for each tool call
pub fn trace_line(name: &str, arguments: &str) -> String {
    format!("[Tool {} called with args {}]", name, arguments)
}

/// Drives queries through the model and the tool session
///
/// Owns the session and the history exclusively; queries run one at a time
/// because `process_query` takes `&mut self`.
pub struct Orchestrator {
    session: ToolSession,
    provider: Box<dyn Provider>,
    conversation: ConversationEngine,
    invoker: ToolInvoker,
    declarations: Vec<ToolDeclaration>,
    state: QueryState,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    pub fn new(session: ToolSession, provider: Box<dyn Provider>, logger: Arc<dyn Logger>) -> Self {
        // The catalog does not change for the life of the session
        let declarations = ConversationEngine::build_tool_declarations(session.catalog());
        Self {
            session,
            provider,
            conversation: ConversationEngine::new(Arc::clone(&logger)),
            invoker: ToolInvoker::new(Arc::clone(&logger)),
            declarations,
            state: QueryState::Idle,
            logger,
        }
    }

    /// Build with the token ceiling and system prompt from the settings
    pub fn with_settings(
        session: ToolSession,
        provider: Box<dyn Provider>,
        settings: &ModelSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let mut orchestrator = Self::new(session, provider, logger);
        orchestrator.conversation = ConversationEngine::new(Arc::clone(&orchestrator.logger))
            .with_system_prompt(settings.system_prompt.clone())
            .with_max_output_tokens(settings.max_output_tokens);
        orchestrator
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn session(&self) -> &ToolSession {
        &self.session
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.conversation.history()
    }

    /// Run one query to completion
    ///
    /// On error the history is rolled back to where it was before the query
    /// and the session stays usable for the next one.
    pub async fn process_query(&mut self, query: &str) -> Result<QueryOutcome> {
        if !self.session.is_initialized() {
            return Err(McpError::Closed.into());
        }

        let checkpoint = self.conversation.checkpoint();
        match self.run_query(query).await {
            Ok(outcome) => {
                self.state = QueryState::Done;
                Ok(outcome)
            }
            Err(e) => {
                self.logger
                    .error(&format!("[Orchestrator] Query failed in {:?}: {}", self.state, e));
                self.conversation.rollback(checkpoint);
                self.state = QueryState::Idle;
                Err(e)
            }
        }
    }

    async fn run_query(&mut self, query: &str) -> Result<QueryOutcome> {
        let mut visible: Vec<String> = Vec::new();

        self.state = QueryState::AwaitingFirstCompletion;
        self.conversation.append(ChatMessage::user(query));
        let first = self
            .conversation
            .request_completion(self.provider.as_ref(), &self.declarations, true)
            .await?;

        if let Some(text) = first.visible_text() {
            visible.push(text.to_string());
        }

        if first.tool_calls.is_empty() {
            self.logger.info("[Orchestrator] No tool calls; done after one round");
            if let Some(text) = first.visible_text() {
                self.conversation.append(ChatMessage::assistant(text));
            }
            return Ok(QueryOutcome {
                text: visible.join("\n"),
                tool_results: Vec::new(),
                rounds: 1,
            });
        }

        self.state = QueryState::ExecutingTools;
        self.logger.info(&format!(
            "[Orchestrator] Executing {} tool call(s)",
            first.tool_calls.len()
        ));

        let mut tool_results = Vec::with_capacity(first.tool_calls.len());
        for call in &first.tool_calls {
            let result = self.invoker.invoke(&self.session, call).await;
            let content = result.content_text();

            self.conversation
                .append(ChatMessage::assistant_tool_calls(vec![call.clone()]));
            self.conversation.append(ChatMessage::tool(&call.id, &content));

            visible.push(trace_line(&call.name, &call.arguments));
            visible.push(content);
            tool_results.push(result);
        }

        self.state = QueryState::AwaitingFollowUp;
        let follow_up = self
            .conversation
            .request_completion(self.provider.as_ref(), &self.declarations, false)
            .await?;

        if !follow_up.tool_calls.is_empty() {
            self.logger.warn(&format!(
                "[Orchestrator] Ignoring {} tool call(s) in follow-up round",
                follow_up.tool_calls.len()
            ));
        }

        if let Some(text) = follow_up.visible_text() {
            visible.push(text.to_string());
            self.conversation.append(ChatMessage::assistant(text));
        }

        Ok(QueryOutcome {
            text: visible.join("\n"),
            tool_results,
            rounds: 2,
        })
    }

    /// Close the tool session; safe to call more than once
    pub async fn shutdown(&mut self) -> Result<()> {
        self.logger.info("[Orchestrator] Shutting down");
        self.session.close().await?;
        Ok(())
    }
}
