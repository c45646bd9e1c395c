//! OpenAI Chat Completions backend

pub mod streaming;

use super::{
    ChatProvider, ConversationRequest, ModelMessage, ProviderError, ProviderEventStream,
    ProviderKind,
};
use crate::config::ProviderEndpointConfig;
use crate::core::function_calling::convert_tools_for_provider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

const PROVIDER: &str = "openai";

/// OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    http: Client,
    api_key: String,
    endpoint: ProviderEndpointConfig,
}

impl OpenAIProvider {
    /// Create a provider for one API key
    pub fn new(
        api_key: impl Into<String>,
        endpoint: ProviderEndpointConfig,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ProviderError::configuration(PROVIDER, e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint,
        })
    }

    /// Transform a conversation to the Chat Completions body
    pub fn build_body(&self, request: &ConversationRequest) -> Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system.is_empty() {
            messages.push(json!({"role": "system", "content": request.system}));
        }
        messages.extend(request.messages.iter().map(transform_message));

        let mut body = json!({
            "model": self.endpoint.model,
            "messages": messages,
            "stream": true,
        });
        if !request.tools.is_empty() {
            body["tools"] = convert_tools_for_provider(ProviderKind::OpenAI, &request.tools);
        }
        if let Some(max_tokens) = self.endpoint.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        body
    }
}

fn transform_message(message: &ModelMessage) -> Value {
    match message {
        ModelMessage::User {
            content,
            attachments,
        } if attachments.is_empty() => json!({"role": "user", "content": content}),
        ModelMessage::User {
            content,
            attachments,
        } => {
            let mut parts = vec![json!({"type": "text", "text": content})];
            for attachment in attachments {
                if attachment.is_image() {
                    parts.push(json!({"type": "image_url", "image_url": {"url": attachment.url}}));
                } else {
                    let name = attachment.name.as_deref().unwrap_or("file");
                    parts.push(json!({
                        "type": "text",
                        "text": format!("[Attachment: {} ({})]", name, attachment.url),
                    }));
                }
            }
            json!({"role": "user", "content": parts})
        }
        ModelMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut message = json!({
                "role": "assistant",
                "content": if content.is_empty() { Value::Null } else { json!(content) },
            });
            if !tool_calls.is_empty() {
                message["tool_calls"] = tool_calls
                    .iter()
                    .map(|call| {
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": {"name": call.name, "arguments": call.arguments},
                        })
                    })
                    .collect();
            }
            message
        }
        ModelMessage::Tool {
            tool_call_id,
            content,
        } => json!({"role": "tool", "tool_call_id": tool_call_id, "content": content}),
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn send_conversation(
        &self,
        request: ConversationRequest,
    ) -> Result<ProviderEventStream, ProviderError> {
        let url = format!(
            "{}/chat/completions",
            self.endpoint.base_url.trim_end_matches('/')
        );
        let body = self.build_body(&request);
        debug!(
            model = %self.endpoint.model,
            messages = request.messages.len(),
            "Sending conversation to OpenAI"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(PROVIDER, status.as_u16(), &text));
        }

        Ok(streaming::event_stream(response))
    }
}
