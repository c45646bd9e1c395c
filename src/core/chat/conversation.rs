//! Conversion from client messages to model context

use crate::core::providers::{ModelMessage, ModelToolCall};
use crate::core::types::{Message, Role};

/// Build the model context for a conversation
///
/// Invocations without a result are not part of the context; the model only sees a
/// tool call once its result is known.
pub fn to_model_messages(messages: &[Message]) -> Vec<ModelMessage> {
    let mut out = Vec::with_capacity(messages.len());

    for message in messages {
        match message.role {
            Role::User => out.push(ModelMessage::User {
                content: message.content.clone(),
                attachments: message.attachments.clone(),
            }),
            Role::Assistant => {
                let answered: Vec<_> = message
                    .tool_invocations
                    .iter()
                    .filter_map(|inv| inv.result.as_ref().map(|result| (inv, result)))
                    .collect();

                if message.content.is_empty() && answered.is_empty() {
                    continue;
                }

                out.push(ModelMessage::Assistant {
                    content: message.content.clone(),
                    tool_calls: answered
                        .iter()
                        .map(|(inv, _)| ModelToolCall {
                            id: inv.tool_call_id.clone(),
                            name: inv.tool_name.clone(),
                            arguments: serde_json::to_string(&inv.args)
                                .unwrap_or_else(|_| "{}".to_string()),
                        })
                        .collect(),
                });
                out.extend(answered.into_iter().map(|(inv, result)| ModelMessage::Tool {
                    tool_call_id: inv.tool_call_id.clone(),
                    content: result.to_model_content(),
                }));
            }
        }
    }

    out
}
