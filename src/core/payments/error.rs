//! Payments API errors

use thiserror::Error;

/// Errors from one payments API call
#[derive(Error, Debug)]
pub enum PaymentsError {
    /// The API answered with a non-2xx status
    #[error("Payments API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never got an answer
    #[error("Network error: {0}")]
    Network(String),

    /// The answer was not what the API documents
    #[error("Unexpected response: {0}")]
    Parsing(String),

    /// Client could not be built
    #[error("Invalid payments client configuration: {0}")]
    Configuration(String),
}

impl PaymentsError {
    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a parsing error
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing(message.into())
    }

    /// HTTP status, when the API answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PaymentsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parsing(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
