//! Payments API configuration

use super::*;
use crate::core::payments::PaymentsEnvironment;
use serde::{Deserialize, Serialize};

/// Payments section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    /// Base URL for the sandbox environment
    #[serde(default = "default_sandbox_url")]
    pub sandbox_base_url: String,
    /// Base URL for the production environment
    #[serde(default = "default_production_url")]
    pub production_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_payments_timeout")]
    pub timeout: u64,
    /// Server-side API secret, used when the client sends no key
    #[serde(default, skip_serializing)]
    pub api_secret: Option<String>,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            sandbox_base_url: default_sandbox_url(),
            production_base_url: default_production_url(),
            timeout: default_payments_timeout(),
            api_secret: None,
        }
    }
}

impl PaymentsConfig {
    /// Base URL for an environment
    pub fn base_url(&self, environment: PaymentsEnvironment) -> &str {
        match environment {
            PaymentsEnvironment::Sandbox => &self.sandbox_base_url,
            PaymentsEnvironment::Production => &self.production_base_url,
        }
    }

    /// Validate payments configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("Payments timeout cannot be 0".to_string());
        }
        for url in [&self.sandbox_base_url, &self.production_base_url] {
            if !crate::utils::is_valid_url(url) {
                return Err(format!("Invalid payments base URL: {}", url));
            }
        }
        Ok(())
    }
}

fn default_sandbox_url() -> String {
    "https://agent-sandbox.payman.ai/api".to_string()
}

fn default_production_url() -> String {
    "https://agent.payman.ai/api".to_string()
}
