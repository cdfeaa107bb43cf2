//! Mock provider for testing
//!
//! Returns scripted completions in order without network dependencies. Once
//! the script runs out it echoes the last user message. Every request is
//! recorded so tests can check what the model was shown.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::error::{ProviderError, ProviderResult};
use super::traits::Provider;
use crate::logging::{Logger, NoOpLogger};
use crate::types::{ChatMessage, Completion, CompletionRequest, MessageRole, ToolCall};

/// One scripted reply
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this completion
    Completion(Completion),
    /// Fail the request with this message
    Error(String),
}

impl MockResponse {
    /// A text-only completion
    pub fn text(content: impl Into<String>) -> Self {
        MockResponse::Completion(Completion::text(content))
    }

    /// A completion requesting tool calls, without text
    pub fn tool_calls(calls: Vec<ToolCall>) -> Self {
        MockResponse::Completion(Completion::with_tool_calls(None, calls))
    }

    /// A completion with both text and tool calls
    pub fn text_and_tool_calls(content: impl Into<String>, calls: Vec<ToolCall>) -> Self {
        MockResponse::Completion(Completion::with_tool_calls(Some(content.into()), calls))
    }

    /// A failed request
    pub fn error(message: impl Into<String>) -> Self {
        MockResponse::Error(message.into())
    }
}

/// Mock LLM provider for testing
pub struct MockProvider {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
    logger: Arc<dyn Logger>,
}

// Poisoning is ignored; the queue is never left half-updated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create an echo provider with an empty script
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create a provider that replays the given responses in order
    pub fn scripted(responses: impl IntoIterator<Item = MockResponse>) -> Self {
        let provider = Self::new(Arc::new(NoOpLogger));
        provider.add_responses(responses);
        provider
    }

    /// Queue one more response
    pub fn add_response(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Queue several responses
    pub fn add_responses(&self, responses: impl IntoIterator<Item = MockResponse>) {
        lock(&self.responses).extend(responses);
    }

    /// Responses not yet consumed
    pub fn remaining_responses(&self) -> usize {
        lock(&self.responses).len()
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    fn last_user_message(messages: &[ChatMessage]) -> &str {
        messages
            .iter()
            .rev()
            .find(|msg| msg.role == MessageRole::User)
            .and_then(|msg| msg.text())
            .unwrap_or("Hello from MockProvider!")
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<Completion> {
        self.logger.debug(&format!(
            "[MockProvider] complete called: messages={}, tools_offered={}",
            request.messages.len(),
            request.offers_tools()
        ));

        let scripted = lock(&self.responses).pop_front();
        let reply = match scripted {
            Some(MockResponse::Completion(completion)) => Ok(completion),
            Some(MockResponse::Error(message)) => {
                self.logger
                    .debug(&format!("[MockProvider] Scripted error: {}", message));
                Err(ProviderError::api_error("mock", message))
            }
            None => Ok(Completion::text(format!(
                "Echo: {}",
                Self::last_user_message(&request.messages)
            ))),
        };

        lock(&self.requests).push(request);
        reply
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("remaining_responses", &self.remaining_responses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user(content)])
    }

    #[tokio::test]
    async fn test_echo_when_script_is_empty() {
        let provider = MockProvider::new(Arc::new(NoOpLogger::new()));
        let completion = provider.complete(request("Hello, world!")).await.unwrap();
        assert_eq!(completion.visible_text(), Some("Echo: Hello, world!"));
        assert!(completion.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let provider = MockProvider::scripted([
            MockResponse::tool_calls(vec![ToolCall::new("c1", "echo", r#"{"message":"hi"}"#)]),
            MockResponse::text("done"),
        ]);
        assert_eq!(provider.remaining_responses(), 2);

        let first = provider.complete(request("a")).await.unwrap();
        assert_eq!(first.tool_calls.len(), 1);
        assert_eq!(first.tool_calls[0].name, "echo");

        let second = provider.complete(request("b")).await.unwrap();
        assert_eq!(second.visible_text(), Some("done"));

        // Falls back to echo afterwards
        let third = provider.complete(request("c")).await.unwrap();
        assert_eq!(third.visible_text(), Some("Echo: c"));
    }

    #[tokio::test]
    async fn test_scripted_error() {
        let provider = MockProvider::scripted([MockResponse::error("rate limited")]);
        let err = provider.complete(request("a")).await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiError { .. }));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_records_requests() {
        let provider = MockProvider::scripted([MockResponse::error("x")]);
        let _ = provider.complete(request("first")).await;
        let _ = provider.complete(request("second")).await;

        let seen = provider.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].messages[0].text(), Some("second"));
    }
}
