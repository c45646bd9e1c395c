//! LLM provider backends
//!
//! Each backend implements [`ChatProvider`]: it takes a provider-neutral conversation
//! and returns a stream of text deltas, complete tool calls and a finish event.

pub mod anthropic;
mod error;
pub mod openai;
mod types;

pub use anthropic::AnthropicProvider;
pub use error::ProviderError;
pub use openai::OpenAIProvider;
pub use types::*;

use crate::config::ProvidersConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Streaming chat capability of one backend
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logs and errors
    fn name(&self) -> &'static str;

    /// Send the conversation; the returned stream yields the model's response
    async fn send_conversation(
        &self,
        request: ConversationRequest,
    ) -> Result<ProviderEventStream, ProviderError>;
}

/// Supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProviderKind {
    #[default]
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl ProviderKind {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(format!("Unsupported provider: {}", other)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the backend for a request
pub fn create_provider(
    kind: ProviderKind,
    api_key: &str,
    config: &ProvidersConfig,
) -> Result<Arc<dyn ChatProvider>, ProviderError> {
    let endpoint = config.endpoint(kind).clone();
    Ok(match kind {
        ProviderKind::OpenAI => Arc::new(OpenAIProvider::new(api_key, endpoint)?),
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(api_key, endpoint)?),
    })
}
