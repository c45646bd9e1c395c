//! Type definitions for streaming responses

use crate::core::types::{ToolArguments, ToolResult};
use actix_web::web;
use serde::{Deserialize, Serialize};

/// Simple Event structure for SSE compatibility
#[derive(Debug, Clone, Default)]
pub struct Event {
    /// Event type
    pub event: Option<String>,
    /// Event data
    pub data: String,
}

impl Event {
    /// Create a new empty event
    pub fn new() -> Self {
        Self {
            event: None,
            data: String::new(),
        }
    }

    /// Set the event type
    pub fn event(mut self, event: &str) -> Self {
        self.event = Some(event.to_string());
        self
    }

    /// Set the event data
    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    /// Convert event to bytes for SSE transmission
    pub fn to_bytes(&self) -> web::Bytes {
        let mut result = String::new();
        if let Some(event) = &self.event {
            result.push_str(&format!("event: {}\n", event));
        }
        for line in self.data.split('\n') {
            result.push_str(&format!("data: {}\n", line));
        }
        result.push('\n');
        web::Bytes::from(result)
    }
}

/// Why a chat turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished without pending tool calls
    Stop,
    /// A tool result is a form request; the client must collect input
    AwaitingInput,
    /// The turn used up its model round-trips
    MaxSteps,
    /// The turn was aborted
    Error,
}

/// One part of the chat route's stream, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatStreamPart {
    /// First part of every response
    #[serde(rename_all = "camelCase")]
    Start { message_id: String },
    /// Incremental assistant text
    TextDelta { text: String },
    /// The model called a tool
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        args: ToolArguments,
    },
    /// Result of a tool call
    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        result: ToolResult,
    },
    /// Chat-level failure
    Error { error: String },
    /// Last part before `[DONE]`
    Finish { reason: FinishReason },
}

impl ChatStreamPart {
    /// Convert to an SSE event
    pub fn to_event(&self) -> Event {
        let data = serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({"type": "error", "error": e.to_string()}).to_string()
        });
        Event::default().data(&data)
    }

    /// Whether this part ends the turn
    pub fn is_finish(&self) -> bool {
        matches!(self, Self::Finish { .. })
    }
}
