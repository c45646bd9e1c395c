//! Message types for the chat conversation

use super::tools::{ToolInvocation, ToolResult};
use serde::{Deserialize, Serialize};

/// Message role enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// File attached to a user message, passed through to the model as a URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment URL (may be a data: URL)
    pub url: String,
    /// MIME type
    #[serde(default)]
    pub content_type: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

impl Attachment {
    /// Whether the attachment is an image the model can look at
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// One message of the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID, generated client-side
    pub id: String,
    /// Author role
    pub role: Role,
    /// Text content
    #[serde(default)]
    pub content: String,
    /// Attachments on a user message
    #[serde(
        default,
        rename = "experimental_attachments",
        alias = "attachments",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attachments: Vec<Attachment>,
    /// Tool invocations on an assistant message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_invocations: Vec<ToolInvocation>,
}

impl Message {
    /// Create a user message
    pub fn user(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::User,
            content: content.into(),
            attachments: Vec::new(),
            tool_invocations: Vec::new(),
        }
    }

    /// Create an empty assistant message
    pub fn assistant(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Assistant,
            content: String::new(),
            attachments: Vec::new(),
            tool_invocations: Vec::new(),
        }
    }

    /// Find an invocation by tool call ID
    pub fn invocation(&self, tool_call_id: &str) -> Option<&ToolInvocation> {
        self.tool_invocations
            .iter()
            .find(|inv| inv.tool_call_id == tool_call_id)
    }

    /// Find an invocation by tool call ID, mutably
    pub fn invocation_mut(&mut self, tool_call_id: &str) -> Option<&mut ToolInvocation> {
        self.tool_invocations
            .iter_mut()
            .find(|inv| inv.tool_call_id == tool_call_id)
    }

    /// Invocations whose result is an unanswered form request
    pub fn pending_form_requests(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.tool_invocations
            .iter()
            .filter(|inv| matches!(inv.result, Some(ToolResult::FormRequest { .. })))
    }
}
