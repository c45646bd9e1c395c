//! One chat turn against a provider

use crate::core::function_calling::{FunctionDefinition, ToolExecutor};
use crate::core::providers::{
    ChatProvider, ConversationRequest, ModelMessage, ModelToolCall, ProviderEvent,
};
use crate::core::streaming::{ChatStreamPart, FinishReason, error_parts};
use crate::core::types::{ToolArguments, ToolCall};
use crate::utils::generate_message_id;
use futures::StreamExt;
use futures::stream::BoxStream;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives one turn of the conversation
pub struct ChatTurn {
    provider: Arc<dyn ChatProvider>,
    executor: ToolExecutor,
    system_prompt: String,
    max_steps: u32,
}

impl ChatTurn {
    /// Create a turn
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        executor: ToolExecutor,
        system_prompt: impl Into<String>,
        max_steps: u32,
    ) -> Self {
        Self {
            provider,
            executor,
            system_prompt: system_prompt.into(),
            max_steps,
        }
    }

    /// Run the turn. The stream always ends with a `finish` part.
    pub fn run(self, messages: Vec<ModelMessage>) -> BoxStream<'static, ChatStreamPart> {
        Box::pin(async_stream::stream! {
            let tools: Vec<FunctionDefinition> = self.executor.registry().function_definitions();
            let mut context = messages;

            yield ChatStreamPart::Start { message_id: generate_message_id() };

            for step in 0..self.max_steps {
                debug!(provider = self.provider.name(), step, "Starting model step");
                let request = ConversationRequest {
                    system: self.system_prompt.clone(),
                    messages: context.clone(),
                    tools: tools.clone(),
                };

                let mut events = match self.provider.send_conversation(request).await {
                    Ok(events) => events,
                    Err(e) => {
                        warn!(provider = self.provider.name(), "Provider request failed: {}", e);
                        for part in error_parts(e.to_string()) {
                            yield part;
                        }
                        return;
                    }
                };

                let mut text = String::new();
                let mut raw_calls: Vec<ModelToolCall> = Vec::new();
                while let Some(event) = events.next().await {
                    match event {
                        Ok(ProviderEvent::TextDelta(delta)) => {
                            text.push_str(&delta);
                            yield ChatStreamPart::TextDelta { text: delta };
                        }
                        Ok(ProviderEvent::ToolCall { id, name, arguments }) => {
                            raw_calls.push(ModelToolCall { id, name, arguments });
                        }
                        Ok(ProviderEvent::Finish(reason)) => {
                            debug!(?reason, "Model step finished");
                        }
                        Err(e) => {
                            warn!(provider = self.provider.name(), "Provider stream failed: {}", e);
                            for part in error_parts(e.to_string()) {
                                yield part;
                            }
                            return;
                        }
                    }
                }

                if raw_calls.is_empty() {
                    yield ChatStreamPart::Finish { reason: FinishReason::Stop };
                    return;
                }

                let mut calls = Vec::with_capacity(raw_calls.len());
                for raw in &raw_calls {
                    match parse_arguments(&raw.arguments) {
                        Ok(args) => calls.push(ToolCall::new(&raw.id, &raw.name, args)),
                        Err(message) => {
                            warn!(tool = %raw.name, "Model sent malformed tool arguments");
                            for part in error_parts(format!(
                                "Invalid arguments for tool {}: {}",
                                raw.name, message
                            )) {
                                yield part;
                            }
                            return;
                        }
                    }
                }

                context.push(ModelMessage::Assistant { content: text, tool_calls: raw_calls });

                let mut awaiting_input = false;
                for call in calls {
                    yield ChatStreamPart::ToolCall {
                        tool_call_id: call.tool_call_id.clone(),
                        tool_name: call.tool_name.clone(),
                        args: call.args.clone(),
                    };

                    let result = self.executor.execute(&call).await;
                    awaiting_input |= result.is_form_request();
                    context.push(ModelMessage::Tool {
                        tool_call_id: call.tool_call_id.clone(),
                        content: result.to_model_content(),
                    });

                    yield ChatStreamPart::ToolResult {
                        tool_call_id: call.tool_call_id,
                        tool_name: call.tool_name,
                        result,
                    };
                }

                if awaiting_input {
                    info!("Turn paused for user input");
                    yield ChatStreamPart::Finish { reason: FinishReason::AwaitingInput };
                    return;
                }
            }

            info!(max_steps = self.max_steps, "Turn reached the step limit");
            yield ChatStreamPart::Finish { reason: FinishReason::MaxSteps };
        })
    }
}

/// Arguments must be a JSON object; an empty string means no arguments
fn parse_arguments(raw: &str) -> Result<ToolArguments, String> {
    if raw.trim().is_empty() {
        return Ok(ToolArguments::new());
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(args)) => Ok(args),
        Ok(other) => Err(format!("expected a JSON object, got {}", other)),
        Err(e) => Err(e.to_string()),
    }
}
