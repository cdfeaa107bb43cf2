//! Core types for model and tool interactions
//!
//! This module contains the shared types used by the session, the
//! providers and the orchestrator.

mod message;
mod tool;
mod value;
mod completion;

pub use message::{ChatMessage, MessageRole};
pub use tool::{Tool, ToolCall, ToolChoice, ToolFailureKind, ToolOutcome, ToolResult};
pub use value::{
    arguments_to_json, encode_arguments, parse_arguments, ArgumentError, ToolArguments, ToolValue,
};
pub use completion::{Completion, CompletionRequest, ToolDeclaration, DEFAULT_MAX_OUTPUT_TOKENS};
