//! Persisted client settings

use super::SessionError;
use crate::core::payments::PaymentsEnvironment;
use crate::core::providers::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Credentials and preferences kept between client sessions
///
/// Values stay until explicitly removed; there is no expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    #[serde(rename = "openaiApiKey", skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(rename = "anthropicApiKey", skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    #[serde(rename = "paymanApiKey", skip_serializing_if = "Option::is_none")]
    pub payman_api_key: Option<String>,
    #[serde(rename = "aiProvider")]
    pub ai_provider: ProviderKind,
    #[serde(rename = "paymanMode")]
    pub payman_mode: PaymentsEnvironment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl ClientSettings {
    /// Load settings; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write settings, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// LLM key for a provider
    pub fn api_key_for(&self, provider: ProviderKind) -> Option<&str> {
        match provider {
            ProviderKind::OpenAI => self.openai_api_key.as_deref(),
            ProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
        }
        .filter(|key| !key.is_empty())
    }

    /// LLM key for the selected provider
    pub fn active_api_key(&self) -> Option<&str> {
        self.api_key_for(self.ai_provider)
    }

    /// Store the LLM key for a provider
    pub fn set_api_key(&mut self, provider: ProviderKind, key: impl Into<String>) {
        let slot = match provider {
            ProviderKind::OpenAI => &mut self.openai_api_key,
            ProviderKind::Anthropic => &mut self.anthropic_api_key,
        };
        *slot = Some(key.into());
    }

    /// Remove every stored credential
    pub fn clear_credentials(&mut self) {
        self.openai_api_key = None;
        self.anthropic_api_key = None;
        self.payman_api_key = None;
        self.access_token = None;
    }
}
