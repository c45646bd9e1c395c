//! Client-side chat session
//!
//! `ChatSession` owns the conversation and moves between three states:
//!
//! - `Idle`: ready for user input
//! - `AwaitingModel`: a turn is streaming; new input is refused
//! - `AwaitingForm`: a tool asked for input; the user fills in a form or cancels
//!
//! The session never talks to the network. It produces `ChatRequest`s and consumes
//! `ChatStreamPart`s, so any transport can drive it.

mod settings;
mod shortcuts;

pub use settings::ClientSettings;
pub use shortcuts::{QUICK_ACTIONS, QuickAction, expand_shortcut};

use crate::core::forms::{Form, FormError};
use crate::core::streaming::{ChatStreamPart, FinishReason};
use crate::core::types::{Attachment, ChatRequest, Message, Role, ToolInvocation, ToolResult};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A response is still streaming")]
    Busy,

    #[error("A form is waiting for input")]
    AwaitingForm,

    #[error("No form is open")]
    NoForm,

    #[error("Message is empty")]
    EmptyInput,

    #[error("Unexpected stream part in state {0:?}")]
    UnexpectedPart(SessionStatus),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings format error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse session state, for display and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    AwaitingModel,
    AwaitingForm,
}

#[derive(Debug, Clone)]
enum State {
    Idle,
    AwaitingModel,
    AwaitingForm {
        message_id: String,
        tool_call_id: String,
        form: Form,
    },
}

/// One client session
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: String,
    settings: ClientSettings,
    messages: Vec<Message>,
    state: State,
    banner: Option<String>,
}

impl ChatSession {
    /// Start a session with the given settings
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            settings,
            messages: Vec::new(),
            state: State::Idle,
            banner: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ClientSettings {
        &mut self.settings
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Chat-level error shown above the conversation
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            State::Idle => SessionStatus::Idle,
            State::AwaitingModel => SessionStatus::AwaitingModel,
            State::AwaitingForm { .. } => SessionStatus::AwaitingForm,
        }
    }

    /// The open form, if any
    pub fn form(&self) -> Option<&Form> {
        match &self.state {
            State::AwaitingForm { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.state {
            State::AwaitingForm { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Append a user turn and return the request to send
    pub fn submit_user_input(
        &mut self,
        input: &str,
        attachments: Vec<Attachment>,
    ) -> Result<ChatRequest, SessionError> {
        match self.state {
            State::Idle => {}
            State::AwaitingModel => return Err(SessionError::Busy),
            State::AwaitingForm { .. } => return Err(SessionError::AwaitingForm),
        }

        let content = expand_shortcut(input).trim();
        if content.is_empty() && attachments.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let mut message = Message::user(Uuid::new_v4().to_string(), content);
        message.attachments = attachments;
        self.messages.push(message);
        self.banner = None;
        self.state = State::AwaitingModel;
        Ok(self.request())
    }

    /// Apply one part of a streaming response
    pub fn apply(&mut self, part: ChatStreamPart) -> Result<(), SessionError> {
        if !matches!(self.state, State::AwaitingModel) {
            return Err(SessionError::UnexpectedPart(self.status()));
        }

        match part {
            ChatStreamPart::Start { message_id } => {
                self.messages.push(Message::assistant(message_id));
            }
            ChatStreamPart::TextDelta { text } => {
                self.current_assistant().content.push_str(&text);
            }
            ChatStreamPart::ToolCall {
                tool_call_id,
                tool_name,
                args,
            } => {
                self.current_assistant().tool_invocations.push(ToolInvocation {
                    tool_call_id,
                    tool_name,
                    args,
                    result: None,
                });
            }
            ChatStreamPart::ToolResult {
                tool_call_id,
                result,
                ..
            } => {
                let message = self.current_assistant();
                match message.invocation_mut(&tool_call_id) {
                    Some(invocation) => invocation.result = Some(result),
                    None => warn!(%tool_call_id, "Result for an unknown tool call"),
                }
            }
            ChatStreamPart::Error { error } => {
                self.banner = Some(error);
            }
            ChatStreamPart::Finish { reason } => self.finish(reason),
        }
        Ok(())
    }

    /// The transport failed before the turn finished
    pub fn fail(&mut self, error: impl Into<String>) {
        self.banner = Some(error.into());
        self.state = State::Idle;
    }

    /// Submit the open form and return the request for the next turn
    ///
    /// On a validation error the form stays open.
    pub fn submit_form(&mut self) -> Result<ChatRequest, SessionError> {
        let State::AwaitingForm {
            message_id,
            tool_call_id,
            form,
        } = &self.state
        else {
            return Err(SessionError::NoForm);
        };

        let submission = form.submit()?;
        let (message_id, tool_call_id) = (message_id.clone(), tool_call_id.clone());

        if let Some(invocation) = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .and_then(|m| m.invocation_mut(&tool_call_id))
        {
            invocation.result = Some(submission);
        }

        debug!(%tool_call_id, "Form submitted");
        self.state = State::AwaitingModel;
        Ok(self.request())
    }

    /// Discard the open form; the pending call is dropped and the model is not told
    pub fn cancel_form(&mut self) -> Result<(), SessionError> {
        if !matches!(self.state, State::AwaitingForm { .. }) {
            return Err(SessionError::NoForm);
        }
        let State::AwaitingForm {
            message_id,
            tool_call_id,
            ..
        } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return Err(SessionError::NoForm);
        };

        if let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) {
            message
                .tool_invocations
                .retain(|inv| inv.tool_call_id != tool_call_id);
        }
        debug!(%tool_call_id, "Form cancelled");
        Ok(())
    }

    /// Request carrying the whole conversation
    pub fn request(&self) -> ChatRequest {
        ChatRequest {
            messages: self.messages.clone(),
            provider: Some(self.settings.ai_provider.as_str().to_string()),
            experimental_attachments: None,
        }
    }

    fn current_assistant(&mut self) -> &mut Message {
        if !matches!(self.messages.last(), Some(m) if m.role == Role::Assistant) {
            self.messages.push(Message::assistant(Uuid::new_v4().to_string()));
        }
        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }

    fn finish(&mut self, reason: FinishReason) {
        self.state = State::Idle;
        if reason != FinishReason::AwaitingInput {
            return;
        }

        let Some(message) = self.messages.last() else {
            return;
        };

        // Open the first request that has a form; the rest wait for later turns
        let mut last_error = None;
        for invocation in message.pending_form_requests() {
            let Some(ToolResult::FormRequest {
                submit_to, args, ..
            }) = &invocation.result
            else {
                continue;
            };

            match Form::render(submit_to, args) {
                Ok(form) => {
                    self.state = State::AwaitingForm {
                        message_id: message.id.clone(),
                        tool_call_id: invocation.tool_call_id.clone(),
                        form,
                    };
                    return;
                }
                Err(e) => {
                    warn!(tool = %invocation.tool_name, "Cannot show form: {}", e);
                    last_error = Some(e);
                }
            }
        }

        if let Some(e) = last_error {
            self.banner = Some(e.to_string());
        }
    }
}
