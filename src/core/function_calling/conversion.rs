//! Provider-specific format conversion for function calling

use super::types::*;
use crate::core::providers::ProviderKind;
use serde_json::{Value, json};

/// Convert function definitions to provider-specific format
pub fn convert_tools_for_provider(provider: ProviderKind, tools: &[FunctionDefinition]) -> Value {
    match provider {
        ProviderKind::OpenAI => {
            // OpenAI format
            let openai_tools: Vec<FunctionTool> = tools
                .iter()
                .map(|function| FunctionTool {
                    tool_type: "function".to_string(),
                    function: function.clone(),
                })
                .collect();
            json!(openai_tools)
        }
        ProviderKind::Anthropic => {
            // Anthropic format
            let anthropic_tools: Vec<Value> = tools
                .iter()
                .map(|tool| {
                    json!({
                        "name": tool.name,
                        "description": tool.description,
                        "input_schema": tool.parameters
                    })
                })
                .collect();
            json!(anthropic_tools)
        }
    }
}
