//! Configuration management for Paygent
//!
//! This module handles loading, validation, and management of the service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{PaygentError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/paygent.yaml";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// LLM provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Payments API settings
    #[serde(default)]
    pub payments: PaymentsConfig,
    /// OAuth token exchange settings
    #[serde(default)]
    pub oauth: OAuthConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PaygentError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| PaygentError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file if it exists, fall back to defaults otherwise, then apply
    /// environment overrides
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path).await?
        } else {
            warn!("Config file {:?} not found, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PAYGENT_*`, `PAYMAN_*` and provider base URL variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PAYGENT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PAYGENT_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| PaygentError::config(format!("Invalid PAYGENT_PORT: {}", port)))?;
        }
        if let Some(timeout) = lookup("PAYGENT_TIMEOUT") {
            self.server.timeout = timeout.parse().map_err(|_| {
                PaygentError::config(format!("Invalid PAYGENT_TIMEOUT: {}", timeout))
            })?;
        }
        if let Some(provider) = lookup("PAYGENT_DEFAULT_PROVIDER") {
            self.providers.default_provider = provider.parse().map_err(PaygentError::config)?;
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.providers.openai.base_url = url;
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            self.providers.openai.model = model;
        }
        if let Some(url) = lookup("ANTHROPIC_BASE_URL") {
            self.providers.anthropic.base_url = url;
        }
        if let Some(model) = lookup("ANTHROPIC_MODEL") {
            self.providers.anthropic.model = model;
        }
        if let Some(secret) = lookup("PAYMAN_API_SECRET") {
            self.payments.api_secret = Some(secret);
        }
        if let Some(url) = lookup("PAYMAN_SANDBOX_URL") {
            self.payments.sandbox_base_url = url;
        }
        if let Some(url) = lookup("PAYMAN_PRODUCTION_URL") {
            self.payments.production_base_url = url;
        }
        if let Some(id) = lookup("PAYMAN_CLIENT_ID") {
            self.oauth.client_id = Some(id);
        }
        if let Some(secret) = lookup("PAYMAN_CLIENT_SECRET") {
            self.oauth.client_secret = Some(secret);
        }
        if let Some(endpoint) = lookup("PAYMAN_TOKEN_ENDPOINT") {
            self.oauth.token_endpoint = Some(endpoint);
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Get providers configuration
    pub fn providers(&self) -> &ProvidersConfig {
        &self.providers
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| PaygentError::Config(format!("Server config error: {}", e)))?;

        self.providers
            .validate()
            .map_err(|e| PaygentError::Config(format!("Providers config error: {}", e)))?;

        self.payments
            .validate()
            .map_err(|e| PaygentError::Config(format!("Payments config error: {}", e)))?;

        self.oauth
            .validate()
            .map_err(|e| PaygentError::Config(format!("OAuth config error: {}", e)))?;

        self.server.cors.warn_if_permissive();
        if !self.oauth.is_configured() {
            debug!("OAuth is not fully configured; /api/auth/token will fail");
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.providers = other.providers;
        self.payments.api_secret = other.payments.api_secret.or(self.payments.api_secret);
        self.payments.sandbox_base_url = other.payments.sandbox_base_url;
        self.payments.production_base_url = other.payments.production_base_url;
        self.payments.timeout = other.payments.timeout;
        self.oauth = OAuthConfig {
            client_id: other.oauth.client_id.or(self.oauth.client_id),
            client_secret: other.oauth.client_secret.or(self.oauth.client_secret),
            token_endpoint: other.oauth.token_endpoint.or(self.oauth.token_endpoint),
        };
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PaygentError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
