//! Test fixtures
//!
//! Builders for configuration, chat bodies and provider stream payloads.

use paygent::config::Config;
use paygent::core::providers::ProviderKind;
use serde_json::{Value, json};

/// LLM key sent in tests
pub const LLM_KEY: &str = "sk-test";

/// Payments key sent in tests
pub const PAYMENTS_KEY: &str = "pm-test";

/// Configuration pointing both LLM backends and the sandbox payments API at mocks
pub fn test_config(llm_url: &str, payments_url: &str) -> Config {
    let mut config = Config::default();
    config.providers.default_provider = ProviderKind::OpenAI;
    config.providers.openai.base_url = llm_url.to_string();
    config.providers.anthropic.base_url = llm_url.to_string();
    config.payments.sandbox_base_url = payments_url.to_string();
    config.server.timeout = 10;
    config
}

/// A user message as the client sends it
pub fn user_message(id: &str, text: &str) -> Value {
    json!({"id": id, "role": "user", "content": text})
}

/// Chat route body
pub fn chat_body(messages: Vec<Value>) -> Value {
    json!({ "messages": messages })
}

/// OpenAI stream that only writes text
pub fn openai_text(chunks: &[&str]) -> String {
    let mut events: Vec<Value> = chunks
        .iter()
        .map(|text| json!({"choices": [{"delta": {"content": text}, "finish_reason": null}]}))
        .collect();
    events.push(json!({"choices": [{"delta": {}, "finish_reason": "stop"}]}));
    sse(&events)
}

/// OpenAI stream carrying a single tool call
pub fn openai_tool_call(id: &str, name: &str, arguments: Value) -> String {
    openai_raw_tool_call(id, name, &arguments.to_string())
}

/// OpenAI stream carrying a tool call with verbatim argument text
pub fn openai_raw_tool_call(id: &str, name: &str, arguments: &str) -> String {
    // Split the arguments the way the API fragments them
    let mid = arguments
        .char_indices()
        .map(|(i, _)| i)
        .nth(arguments.chars().count() / 2)
        .unwrap_or(0);
    let (head, tail) = arguments.split_at(mid);
    sse(&[
        json!({"choices": [{"delta": {"tool_calls": [
            {"index": 0, "id": id, "type": "function", "function": {"name": name, "arguments": head}}
        ]}, "finish_reason": null}]}),
        json!({"choices": [{"delta": {"tool_calls": [
            {"index": 0, "function": {"arguments": tail}}
        ]}, "finish_reason": null}]}),
        json!({"choices": [{"delta": {}, "finish_reason": "tool_calls"}]}),
    ])
}

/// Anthropic stream that only writes text
pub fn anthropic_text(text: &str) -> String {
    let events = [
        json!({"type": "message_start", "message": {"id": "msg_1"}}),
        json!({"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": text}}),
        json!({"type": "content_block_stop", "index": 0}),
        json!({"type": "message_delta", "delta": {"stop_reason": "end_turn"}}),
        json!({"type": "message_stop"}),
    ];
    let mut body = String::new();
    for event in &events {
        let name = event["type"].as_str().unwrap_or_default();
        body.push_str(&format!("event: {}\ndata: {}\n\n", name, event));
    }
    body
}

fn sse(events: &[Value]) -> String {
    let mut body = String::new();
    for event in events {
        body.push_str(&format!("data: {}\n\n", event));
    }
    body.push_str("data: [DONE]\n\n");
    body
}
