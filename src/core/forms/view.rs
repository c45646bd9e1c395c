//! Display model for tool results in the tool-call panel

use crate::core::types::{ToolArguments, ToolResult};
use serde::Serialize;
use serde_json::Value;

/// Badge shown next to a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultStatus {
    Ok,
    Failed,
    Pending,
}

/// One entry of a list result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    pub title: String,
    pub value: Value,
}

/// Body of a rendered result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResultBody {
    Empty,
    Text(String),
    /// Collapsible items of a JSON array
    Items {
        prefix: String,
        items: Vec<ResultItem>,
    },
    Json {
        prefix: String,
        value: Value,
    },
    FormRequest {
        submit_to: String,
        args: ToolArguments,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResultView {
    pub status: ResultStatus,
    pub body: ResultBody,
}

/// Render a result for display; `None` means the call is still running
pub fn render_tool_result(result: Option<&ToolResult>) -> ToolResultView {
    let Some(result) = result else {
        return ToolResultView {
            status: ResultStatus::Pending,
            body: ResultBody::Empty,
        };
    };

    match result {
        ToolResult::Text { text } => ToolResultView {
            status: ResultStatus::Ok,
            body: render_text(text),
        },
        ToolResult::FormRequest { submit_to, args, .. } => ToolResultView {
            status: ResultStatus::Ok,
            body: ResultBody::FormRequest {
                submit_to: submit_to.clone(),
                args: args.clone(),
            },
        },
        ToolResult::FormSubmission { tool_name, args } => ToolResultView {
            status: ResultStatus::Ok,
            body: ResultBody::Json {
                prefix: format!("Submitted to {}", tool_name),
                value: Value::Object(args.clone()),
            },
        },
        ToolResult::Error { message } => ToolResultView {
            status: ResultStatus::Failed,
            body: ResultBody::Error(message.clone()),
        },
    }
}

/// Text results often embed JSON after a label, e.g. `Found payees: [...]`
fn render_text(text: &str) -> ResultBody {
    let Some(start) = text.find(['[', '{']) else {
        return ResultBody::Text(text.to_string());
    };
    let prefix = text[..start].trim_end().trim_end_matches(':').to_string();

    match serde_json::from_str::<Value>(&text[start..]) {
        Ok(Value::Array(values)) => ResultBody::Items {
            prefix,
            items: values
                .into_iter()
                .enumerate()
                .map(|(i, value)| ResultItem {
                    title: item_title(&value, i),
                    value,
                })
                .collect(),
        },
        Ok(value @ Value::Object(_)) => ResultBody::Json { prefix, value },
        _ => ResultBody::Text(text.to_string()),
    }
}

fn item_title(value: &Value, index: usize) -> String {
    ["name", "id"]
        .iter()
        .find_map(|key| value.get(*key))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| format!("Item {}", index + 1))
}
