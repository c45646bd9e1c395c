//! OAuth authorization code exchange

use crate::config::OAuthConfig;
use crate::utils::error::{PaygentError, Result};
use crate::utils::logging::mask_secret;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Exchanges authorization codes at the configured token endpoint
#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    token_endpoint: String,
}

impl OAuthClient {
    /// Create a client; fails unless id, secret and endpoint are all configured
    pub fn from_config(config: &OAuthConfig, timeout: Duration) -> Result<Self> {
        let (Some(client_id), Some(client_secret), Some(token_endpoint)) = (
            config.client_id.clone(),
            config.client_secret.clone(),
            config.token_endpoint.clone(),
        ) else {
            return Err(PaygentError::config("OAuth client is not configured"));
        };

        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            client_id,
            client_secret,
            token_endpoint,
        })
    }

    /// `Basic` credentials for the token endpoint
    pub fn basic_credentials(&self) -> String {
        use base64::{Engine, engine::general_purpose::STANDARD};
        let credentials = format!("{}:{}", self.client_id, self.client_secret);
        STANDARD.encode(credentials.as_bytes())
    }

    /// Exchange a code and return the token response as-is
    pub async fn exchange_code(&self, code: &str) -> Result<Value> {
        debug!(
            client_id = %self.client_id,
            code = %mask_secret(code),
            "Exchanging authorization code"
        );

        let response = self
            .http
            .post(&self.token_endpoint)
            .query(&[("grant_type", "authorization_code"), ("code", code)])
            .header("Authorization", format!("Basic {}", self.basic_credentials()))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| PaygentError::token_exchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Token exchange failed: {}", body);
            return Err(PaygentError::token_exchange(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token = response
            .json::<Value>()
            .await
            .map_err(|e| PaygentError::token_exchange(e.to_string()))?;
        info!("Token exchange successful");
        Ok(token)
    }
}
