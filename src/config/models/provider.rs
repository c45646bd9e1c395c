//! LLM provider configuration

use super::*;
use crate::core::providers::ProviderKind;
use serde::{Deserialize, Serialize};

/// Default system prompt sent with every conversation
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful payment assistant. Help users understand and manage their payments, transactions, and financial queries. Use the available tools to interact with the payment system when needed. When a tool result has kind FORM_SUBMISSION, the user has completed a form: call the tool named in toolName with the submitted args.";

/// Providers section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Provider used when the request does not name one
    #[serde(default)]
    pub default_provider: ProviderKind,
    /// System prompt for every conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Maximum model round-trips in one chat turn
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
    /// OpenAI settings
    #[serde(default = "ProviderEndpointConfig::openai")]
    pub openai: ProviderEndpointConfig,
    /// Anthropic settings
    #[serde(default = "ProviderEndpointConfig::anthropic")]
    pub anthropic: ProviderEndpointConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            default_provider: ProviderKind::default(),
            system_prompt: default_system_prompt(),
            max_steps: default_max_steps(),
            openai: ProviderEndpointConfig::openai(),
            anthropic: ProviderEndpointConfig::anthropic(),
        }
    }
}

impl ProvidersConfig {
    /// Settings for one provider
    pub fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpointConfig {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
        }
    }

    /// Validate providers configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == 0 {
            return Err("max_steps cannot be 0".to_string());
        }
        self.openai.validate("openai")?;
        self.anthropic.validate("anthropic")?;
        Ok(())
    }
}

/// Per-provider endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderEndpointConfig {
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// API version header value, where the provider needs one
    #[serde(default)]
    pub api_version: Option<String>,
    /// Maximum output tokens, where the provider needs one
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl ProviderEndpointConfig {
    /// OpenAI defaults
    pub fn openai() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4-turbo".to_string(),
            api_version: None,
            max_tokens: None,
        }
    }

    /// Anthropic defaults
    pub fn anthropic() -> Self {
        Self {
            base_url: "https://api.anthropic.com/v1".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            api_version: Some("2023-06-01".to_string()),
            max_tokens: Some(4096),
        }
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if !crate::utils::is_valid_url(&self.base_url) {
            return Err(format!("{} base_url is not a valid URL: {}", name, self.base_url));
        }
        if self.model.trim().is_empty() {
            return Err(format!("{} model cannot be empty", name));
        }
        Ok(())
    }
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}
