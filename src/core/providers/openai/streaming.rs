//! OpenAI streaming response handler
//!
//! Decodes Chat Completions chunks and reassembles tool calls whose arguments arrive
//! in fragments, keyed by the tool call index.

use crate::core::providers::{ProviderError, ProviderEvent, ProviderEventStream, StopReason};
use crate::core::streaming::{SseDecoder, is_done};
use futures::StreamExt;
use serde::Deserialize;
use std::collections::BTreeMap;

const PROVIDER: &str = "openai";

/// Streaming response chunk for chat completions
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChatCompletionChunkChoice>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

/// Choice in a streaming chat completion chunk
#[derive(Debug, Deserialize)]
struct ChatCompletionChunkChoice {
    #[serde(default)]
    delta: Option<ChatCompletionDelta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Delta containing incremental content
#[derive(Debug, Deserialize)]
struct ChatCompletionDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallDelta>>,
}

/// Tool call delta for streaming function calls
#[derive(Debug, Deserialize)]
struct ToolCallDelta {
    #[serde(default)]
    index: u32,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    function: Option<FunctionCallDelta>,
}

/// Function call delta for streaming
#[derive(Debug, Deserialize)]
struct FunctionCallDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

#[derive(Debug, Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Decoding state for one response
#[derive(Debug, Default)]
pub struct OpenAIStreamState {
    tool_calls: BTreeMap<u32, PartialToolCall>,
    finished: bool,
}

impl OpenAIStreamState {
    /// Handle one SSE `data` payload
    pub fn handle_data(&mut self, data: &str) -> Result<Vec<ProviderEvent>, ProviderError> {
        if is_done(data) {
            return Ok(self.finish(None));
        }

        let chunk: ChatCompletionChunk = serde_json::from_str(data).map_err(|e| {
            ProviderError::response_parsing(PROVIDER, format!("Failed to parse SSE JSON: {}", e))
        })?;

        if let Some(error) = chunk.error {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(ProviderError::api_error(PROVIDER, 500, message));
        }

        let mut events = Vec::new();
        for choice in chunk.choices {
            if let Some(delta) = choice.delta {
                if let Some(content) = delta.content.filter(|c| !c.is_empty()) {
                    events.push(ProviderEvent::TextDelta(content));
                }
                for call in delta.tool_calls.unwrap_or_default() {
                    let partial = self.tool_calls.entry(call.index).or_default();
                    if let Some(id) = call.id {
                        partial.id = id;
                    }
                    if let Some(function) = call.function {
                        if let Some(name) = function.name {
                            partial.name.push_str(&name);
                        }
                        if let Some(arguments) = function.arguments {
                            partial.arguments.push_str(&arguments);
                        }
                    }
                }
            }
            if let Some(reason) = choice.finish_reason {
                events.extend(self.finish(Some(&reason)));
            }
        }
        Ok(events)
    }

    /// Emit accumulated tool calls in index order, then the finish event. Only the
    /// first call produces events.
    pub fn finish(&mut self, reason: Option<&str>) -> Vec<ProviderEvent> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;

        let mut events: Vec<ProviderEvent> = std::mem::take(&mut self.tool_calls)
            .into_values()
            .map(|call| ProviderEvent::ToolCall {
                id: call.id,
                name: call.name,
                arguments: call.arguments,
            })
            .collect();

        let stop = match reason {
            Some(reason) => StopReason::from_provider(reason),
            None if events.is_empty() => StopReason::Stop,
            None => StopReason::ToolCalls,
        };
        events.push(ProviderEvent::Finish(stop));
        events
    }
}

/// Turn a streaming HTTP response into provider events
pub fn event_stream(response: reqwest::Response) -> ProviderEventStream {
    Box::pin(async_stream::stream! {
        let mut bytes = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut state = OpenAIStreamState::default();

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

        if let Some(event) = decoder.finish() {
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
        for event in state.finish(None) {
            yield Ok(event);
        }
    })
}
