//! Provider-neutral conversation types

use super::error::ProviderError;
use crate::core::function_calling::FunctionDefinition;
use crate::core::types::Attachment;
use futures::stream::BoxStream;

/// A tool call as sent back to the model in history
#[derive(Debug, Clone, PartialEq)]
pub struct ModelToolCall {
    pub id: String,
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

/// One message of model context
#[derive(Debug, Clone, PartialEq)]
pub enum ModelMessage {
    User {
        content: String,
        attachments: Vec<Attachment>,
    },
    Assistant {
        content: String,
        tool_calls: Vec<ModelToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ModelMessage {
    /// Plain user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
            attachments: Vec::new(),
        }
    }
}

/// One request to a backend
#[derive(Debug, Clone)]
pub struct ConversationRequest {
    pub system: String,
    pub messages: Vec<ModelMessage>,
    pub tools: Vec<FunctionDefinition>,
}

/// Why the model stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Stop,
    ToolCalls,
    Length,
    Other(String),
}

impl StopReason {
    /// Map OpenAI and Anthropic stop reasons
    pub fn from_provider(reason: &str) -> Self {
        match reason {
            "stop" | "end_turn" | "stop_sequence" => Self::Stop,
            "tool_calls" | "function_call" | "tool_use" => Self::ToolCalls,
            "length" | "max_tokens" => Self::Length,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Event decoded from a backend stream
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    /// Incremental text
    TextDelta(String),
    /// A complete tool call; arguments are the raw text the model produced
    ToolCall {
        id: String,
        name: String,
        arguments: String,
    },
    /// End of the model's response
    Finish(StopReason),
}

/// Stream returned by `ChatProvider::send_conversation`
pub type ProviderEventStream = BoxStream<'static, Result<ProviderEvent, ProviderError>>;
