//! Tool dispatch errors

use thiserror::Error;

/// Errors raised while resolving or validating a tool call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The model named a tool that does not exist
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Arguments are missing a required field or have the wrong type
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// Arguments were not a JSON object
    #[error("Tool arguments must be a JSON object: {0}")]
    MalformedArguments(String),
}

impl ToolError {
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
