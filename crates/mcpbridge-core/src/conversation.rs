//! Conversation engine: model-facing history and completion requests

use std::sync::Arc;

use crate::logging::Logger;
use crate::providers::{Provider, ProviderResult};
use crate::tools::ToolCatalog;
use crate::types::{
    ChatMessage, Completion, CompletionRequest, ToolDeclaration, DEFAULT_MAX_OUTPUT_TOKENS,
};

/// Owns the ordered message history and talks to the model oracle
///
/// History is append-only while a query runs. A failed query is undone
/// with [`rollback`](Self::rollback) to the [`checkpoint`](Self::checkpoint)
/// taken before it started.
pub struct ConversationEngine {
    history: Vec<ChatMessage>,
    max_output_tokens: u32,
    logger: Arc<dyn Logger>,
}

impl ConversationEngine {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            history: Vec::new(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            logger,
        }
    }

    /// Start the history with a system message
    pub fn with_system_prompt(mut self, prompt: Option<String>) -> Self {
        if let Some(prompt) = prompt.filter(|p| !p.trim().is_empty()) {
            self.history.insert(0, ChatMessage::system(prompt));
        }
        self
    }

    /// Set the response length ceiling for every request
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Project the catalog into function declarations, in catalog order
    pub fn build_tool_declarations(catalog: &ToolCatalog) -> Vec<ToolDeclaration> {
        catalog.declarations()
    }

    /// Request one completion over the full history
    ///
    /// Declarations (with the "auto" policy) are attached only when
    /// `allow_tools` is set and there is at least one to offer.
    pub async fn request_completion(
        &self,
        provider: &dyn Provider,
        declarations: &[ToolDeclaration],
        allow_tools: bool,
    ) -> ProviderResult<Completion> {
        let mut request = CompletionRequest::new(self.history.clone())
            .with_max_output_tokens(self.max_output_tokens);
        if allow_tools && !declarations.is_empty() {
            request = request.with_tools(declarations.to_vec());
        }

        self.logger.debug(&format!(
            "[ConversationEngine] Requesting completion from {}: {} messages, tools={}",
            provider.name(),
            self.history.len(),
            request.offers_tools()
        ));

        provider.complete(request).await
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Current history length, to roll back to
    pub fn checkpoint(&self) -> usize {
        self.history.len()
    }

    /// Drop everything appended after `checkpoint`
    pub fn rollback(&mut self, checkpoint: usize) {
        if checkpoint < self.history.len() {
            self.logger.debug(&format!(
                "[ConversationEngine] Rolling back {} messages",
                self.history.len() - checkpoint
            ));
            self.history.truncate(checkpoint);
        }
    }
}
