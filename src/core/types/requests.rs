//! Request body types

use super::message::{Attachment, Message, Role};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Whole conversation, resent every turn
    pub messages: Vec<Message>,
    /// Provider selector (`openai` or `anthropic`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Attachments for the latest user message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental_attachments: Option<Vec<Attachment>>,
}

impl ChatRequest {
    /// Conversation with request-level attachments moved onto the last user message
    pub fn into_messages(self) -> Vec<Message> {
        let mut messages = self.messages;
        if let Some(attachments) = self.experimental_attachments {
            if let Some(last_user) = messages.iter_mut().rev().find(|m| m.role == Role::User) {
                last_user.attachments.extend(attachments);
            }
        }
        messages
    }
}

/// Body of `POST /api/auth/token`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub code: Option<String>,
}
