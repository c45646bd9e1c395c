//! OAuth token exchange configuration

use serde::{Deserialize, Serialize};

/// OAuth section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// OAuth client ID
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
    /// Token endpoint the authorization code is exchanged against
    #[serde(default)]
    pub token_endpoint: Option<String>,
}

impl OAuthConfig {
    /// Whether every value needed for an exchange is present
    pub fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some() && self.token_endpoint.is_some()
    }

    /// Validate OAuth configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(endpoint) = &self.token_endpoint {
            if !crate::utils::is_valid_url(endpoint) {
                return Err(format!("Invalid token endpoint: {}", endpoint));
            }
        }
        Ok(())
    }
}
