//! Error handling for Paygent
//!
//! This module defines the top-level error type and its HTTP mapping.

use crate::core::payments::PaymentsError;
use crate::core::providers::ProviderError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for Paygent
pub type Result<T> = std::result::Result<T, PaygentError>;

/// Main error type for Paygent
#[derive(Error, Debug)]
pub enum PaygentError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// LLM provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Payments API errors that escaped a tool boundary
    #[error("Payments error: {0}")]
    Payments(#[from] PaymentsError),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Malformed request bodies or model output
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// OAuth token exchange failures
    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for PaygentError {
    fn status_code(&self) -> StatusCode {
        match self {
            PaygentError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            PaygentError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PaygentError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            PaygentError::Provider(ProviderError::Authentication { .. }) => {
                StatusCode::UNAUTHORIZED
            }
            PaygentError::Provider(ProviderError::RateLimit { .. }) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (code, message) = match self {
            PaygentError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            PaygentError::Unauthorized(_) => ("UNAUTHORIZED", self.to_string()),
            PaygentError::Provider(_) => ("PROVIDER_ERROR", self.to_string()),
            PaygentError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
            PaygentError::Timeout(_) => ("TIMEOUT", self.to_string()),
            PaygentError::TokenExchange(_) => (
                "TOKEN_EXCHANGE_ERROR",
                "Failed to exchange code for token".to_string(),
            ),
            // Parsing and transport failures never echo request content back
            PaygentError::Parsing(_) | PaygentError::Serialization(_) => {
                ("PARSING_ERROR", "Failed to process request".to_string())
            }
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: message,
            code: code.to_string(),
        })
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Helper functions for creating specific errors
impl PaygentError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn token_exchange<S: Into<String>>(message: S) -> Self {
        Self::TokenExchange(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
