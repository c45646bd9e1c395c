//! Anthropic streaming module
//!
//! Maps Messages API stream events to provider events. Tool inputs arrive as
//! `input_json_delta` fragments and are emitted when their content block stops.

use crate::core::providers::{ProviderError, ProviderEvent, ProviderEventStream, StopReason};
use crate::core::streaming::SseDecoder;
use futures::StreamExt;
use serde_json::Value;
use std::collections::HashMap;

const PROVIDER: &str = "anthropic";

/// SSE event types
#[derive(Debug, Clone)]
pub enum SSEEvent {
    /// Message start
    MessageStart,
    /// Content block start
    ContentBlockStart(Value),
    /// Content block delta
    ContentBlockDelta(Value),
    /// Content block stop
    ContentBlockStop(Value),
    /// Message delta
    MessageDelta(Value),
    /// Message stop
    MessageStop,
    /// Error event
    Error(Value),
    /// Ping event (heartbeat)
    Ping,
    /// Unknown event
    Unknown(String),
}

impl SSEEvent {
    /// Parse the JSON `data` payload of one event
    pub fn parse(data: &str) -> Result<Self, ProviderError> {
        let json: Value = serde_json::from_str(data).map_err(|e| {
            ProviderError::response_parsing(PROVIDER, format!("Failed to parse SSE JSON: {}", e))
        })?;
        let event_type = json.get("type").and_then(|t| t.as_str()).unwrap_or("");

        Ok(match event_type {
            "message_start" => SSEEvent::MessageStart,
            "content_block_start" => SSEEvent::ContentBlockStart(json),
            "content_block_delta" => SSEEvent::ContentBlockDelta(json),
            "content_block_stop" => SSEEvent::ContentBlockStop(json),
            "message_delta" => SSEEvent::MessageDelta(json),
            "message_stop" => SSEEvent::MessageStop,
            "error" => SSEEvent::Error(json),
            "ping" => SSEEvent::Ping,
            other => SSEEvent::Unknown(other.to_string()),
        })
    }
}

#[derive(Debug, Default)]
struct PartialToolUse {
    id: String,
    name: String,
    input_json: String,
}

/// Decoding state for one response
#[derive(Debug, Default)]
pub struct AnthropicStreamState {
    tool_uses: HashMap<u64, PartialToolUse>,
    stop_reason: Option<String>,
    finished: bool,
}

impl AnthropicStreamState {
    /// Handle one SSE `data` payload
    pub fn handle_data(&mut self, data: &str) -> Result<Vec<ProviderEvent>, ProviderError> {
        if self.finished {
            return Ok(Vec::new());
        }

        let index = |json: &Value| json.get("index").and_then(|i| i.as_u64()).unwrap_or(0);

        match SSEEvent::parse(data)? {
            SSEEvent::ContentBlockStart(json) => {
                let block = json.get("content_block");
                if block.and_then(|b| b.get("type")).and_then(|t| t.as_str()) == Some("tool_use") {
                    let field = |name: &str| {
                        block
                            .and_then(|b| b.get(name))
                            .and_then(|v| v.as_str())
                            .unwrap_or_default()
                            .to_string()
                    };
                    self.tool_uses.insert(
                        index(&json),
                        PartialToolUse {
                            id: field("id"),
                            name: field("name"),
                            input_json: String::new(),
                        },
                    );
                }
                Ok(Vec::new())
            }
            SSEEvent::ContentBlockDelta(json) => {
                let delta = json.get("delta");
                let delta_type = delta.and_then(|d| d.get("type")).and_then(|t| t.as_str());
                match delta_type {
                    Some("text_delta") => {
                        let text = delta
                            .and_then(|d| d.get("text"))
                            .and_then(|t| t.as_str())
                            .unwrap_or("");
                        if text.is_empty() {
                            Ok(Vec::new())
                        } else {
                            Ok(vec![ProviderEvent::TextDelta(text.to_string())])
                        }
                    }
                    Some("input_json_delta") => {
                        if let Some(partial) = self.tool_uses.get_mut(&index(&json)) {
                            let fragment = delta
                                .and_then(|d| d.get("partial_json"))
                                .and_then(|p| p.as_str())
                                .unwrap_or("");
                            partial.input_json.push_str(fragment);
                        }
                        Ok(Vec::new())
                    }
                    _ => Ok(Vec::new()),
                }
            }
            SSEEvent::ContentBlockStop(json) => Ok(self
                .tool_uses
                .remove(&index(&json))
                .map(|tool| ProviderEvent::ToolCall {
                    id: tool.id,
                    name: tool.name,
                    arguments: if tool.input_json.trim().is_empty() {
                        "{}".to_string()
                    } else {
                        tool.input_json
                    },
                })
                .into_iter()
                .collect()),
            SSEEvent::MessageDelta(json) => {
                if let Some(reason) = json.pointer("/delta/stop_reason").and_then(|r| r.as_str()) {
                    self.stop_reason = Some(reason.to_string());
                }
                Ok(Vec::new())
            }
            SSEEvent::MessageStop => Ok(self.finish()),
            SSEEvent::Error(json) => {
                let message = json
                    .pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("Unknown streaming error");
                Err(ProviderError::api_error(PROVIDER, 500, message))
            }
            SSEEvent::MessageStart | SSEEvent::Ping | SSEEvent::Unknown(_) => Ok(Vec::new()),
        }
    }

    /// Emit the finish event; only the first call produces one
    pub fn finish(&mut self) -> Vec<ProviderEvent> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;
        let reason = self
            .stop_reason
            .as_deref()
            .map(StopReason::from_provider)
            .unwrap_or(StopReason::Stop);
        vec![ProviderEvent::Finish(reason)]
    }
}

/// Turn a streaming HTTP response into provider events
pub fn event_stream(response: reqwest::Response) -> ProviderEventStream {
    Box::pin(async_stream::stream! {
        let mut bytes = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut state = AnthropicStreamState::default();

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(ProviderError::network(PROVIDER, format!("Stream error: {}", e)));
                    return;
                }
            };
            for event in decoder.push(&chunk) {
                match state.handle_data(&event.data) {
                    Ok(events) => {
                        for event in events {
                            yield Ok(event);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        }

        for event in state.finish() {
            yield Ok(event);
        }
    })
}
