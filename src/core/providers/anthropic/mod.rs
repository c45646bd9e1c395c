//! Anthropic Messages backend

pub mod streaming;

use super::{
    ChatProvider, ConversationRequest, ModelMessage, ProviderError, ProviderEventStream,
    ProviderKind,
};
use crate::config::ProviderEndpointConfig;
use crate::core::function_calling::convert_tools_for_provider;
use crate::core::types::Attachment;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

const PROVIDER: &str = "anthropic";
const DEFAULT_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic provider
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    http: Client,
    api_key: String,
    endpoint: ProviderEndpointConfig,
}

impl AnthropicProvider {
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

    /// Transform a conversation to the Messages body
    pub fn build_body(&self, request: &ConversationRequest) -> Value {
        let mut body = json!({
            "model": self.endpoint.model,
            "max_tokens": self.endpoint.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": transform_messages(&request.messages),
            "stream": true,
        });
        if !request.system.is_empty() {
            body["system"] = json!(request.system);
        }
        if !request.tools.is_empty() {
            body["tools"] = convert_tools_for_provider(ProviderKind::Anthropic, &request.tools);
        }
        body
    }
}

/// Build the message list. Consecutive blocks with the same role are merged, so
/// tool results land in one user turn and roles alternate.
fn transform_messages(messages: &[ModelMessage]) -> Vec<Value> {
    let mut out: Vec<(&'static str, Vec<Value>)> = Vec::new();

    for message in messages {
        let (role, blocks) = match message {
            ModelMessage::User {
                content,
                attachments,
            } => {
                let mut blocks = Vec::new();
                if !content.is_empty() {
                    blocks.push(json!({"type": "text", "text": content}));
                }
                blocks.extend(attachments.iter().map(attachment_block));
                ("user", blocks)
            }
            ModelMessage::Assistant {
                content,
                tool_calls,
            } => {
                let mut blocks = Vec::new();
                if !content.is_empty() {
                    blocks.push(json!({"type": "text", "text": content}));
                }
                for call in tool_calls {
                    let input: Value =
                        serde_json::from_str(&call.arguments).unwrap_or_else(|_| json!({}));
                    blocks.push(json!({
                        "type": "tool_use",
                        "id": call.id,
                        "name": call.name,
                        "input": input,
                    }));
                }
                ("assistant", blocks)
            }
            ModelMessage::Tool {
                tool_call_id,
                content,
            } => (
                "user",
                vec![json!({
                    "type": "tool_result",
                    "tool_use_id": tool_call_id,
                    "content": content,
                })],
            ),
        };

        if blocks.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some((last_role, last_blocks)) if *last_role == role => last_blocks.extend(blocks),
            _ => out.push((role, blocks)),
        }
    }

    out.into_iter()
        .map(|(role, blocks)| json!({"role": role, "content": blocks}))
        .collect()
}

fn attachment_block(attachment: &Attachment) -> Value {
    if attachment.is_image() {
        // data:<media type>;base64,<payload>
        if let Some(rest) = attachment.url.strip_prefix("data:") {
            if let Some((media_type, data)) = rest.split_once(";base64,") {
                return json!({
                    "type": "image",
                    "source": {"type": "base64", "media_type": media_type, "data": data},
                });
            }
        }
        return json!({"type": "image", "source": {"type": "url", "url": attachment.url}});
    }
    let name = attachment.name.as_deref().unwrap_or("file");
    json!({"type": "text", "text": format!("[Attachment: {} ({})]", name, attachment.url)})
}

#[async_trait]
impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn send_conversation(
        &self,
        request: ConversationRequest,
    ) -> Result<ProviderEventStream, ProviderError> {
        let url = format!("{}/messages", self.endpoint.base_url.trim_end_matches('/'));
        let body = self.build_body(&request);
        debug!(
            model = %self.endpoint.model,
            messages = request.messages.len(),
            "Sending conversation to Anthropic"
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header(
                "anthropic-version",
                self.endpoint.api_version.as_deref().unwrap_or(DEFAULT_VERSION),
            )
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
