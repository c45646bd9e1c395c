//! Error handling

use crate::core::session::SessionError;
use thiserror::Error;

/// Client-side errors
#[derive(Error, Debug)]
pub enum SdkError {
    /// No LLM key saved for the selected provider
    #[error("No API key configured for {0}")]
    MissingApiKey(String),

    /// Configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Transport failure
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with an error status
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A stream event was not a valid chat part
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The stream closed before the turn finished
    #[error("Stream ended before the response finished")]
    IncompleteStream,

    /// Error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The session rejected a part
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

impl SdkError {
    /// Whether the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SdkError::ApiError { status: 401, .. })
    }
}
