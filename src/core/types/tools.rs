//! Tool call and tool result types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tool arguments as emitted by the model: a partial field mapping
pub type ToolArguments = Map<String, Value>;

/// A function call emitted by the model. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    /// Unique within the conversation
    pub tool_call_id: String,
    /// Registered tool name
    pub tool_name: String,
    /// Arguments the model supplied
    #[serde(default)]
    pub args: ToolArguments,
}

impl ToolCall {
    /// Create a tool call
    pub fn new(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: ToolArguments,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            args,
        }
    }
}

/// Result envelope for one tool call, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolResult {
    /// Plain text fed back to the model
    Text { text: String },
    /// The client must collect more fields before `submit_to` can run
    #[serde(rename_all = "camelCase")]
    FormRequest {
        tool_call_id: String,
        tool_name: String,
        submit_to: String,
        args: ToolArguments,
    },
    /// Fields the user entered for a form request, destined for `tool_name`
    #[serde(rename_all = "camelCase")]
    FormSubmission { tool_name: String, args: ToolArguments },
    /// Readable failure, always prefixed with `Error:`
    Error { message: String },
}

impl ToolResult {
    /// Text result
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Error result; adds the `Error:` prefix when missing
    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.starts_with("Error:") {
            message
        } else {
            format!("Error: {}", message)
        };
        Self::Error { message }
    }

    /// Whether this result waits on a client form
    pub fn is_form_request(&self) -> bool {
        matches!(self, Self::FormRequest { .. })
    }

    /// Whether this result is a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Content of the tool message sent back to the model
    pub fn to_model_content(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Error { message } => message.clone(),
            Self::FormRequest { .. } | Self::FormSubmission { .. } => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }
}

/// A tool call and, once known, its single result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub tool_call_id: String,
    pub tool_name: String,
    #[serde(default)]
    pub args: ToolArguments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ToolResult>,
}

impl ToolInvocation {
    /// Invocation for a call without a result yet
    pub fn pending(call: ToolCall) -> Self {
        Self {
            tool_call_id: call.tool_call_id,
            tool_name: call.tool_name,
            args: call.args,
            result: None,
        }
    }

    /// The underlying call
    pub fn call(&self) -> ToolCall {
        ToolCall::new(&self.tool_call_id, &self.tool_name, self.args.clone())
    }
}
