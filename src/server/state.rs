//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::auth::OAuthClient;
use crate::config::Config;
use crate::core::function_calling::ToolRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP server state shared across handlers
///
/// Nothing here is per-conversation. Provider and payments clients are built per
/// request from the credentials the caller sends, so handlers can run concurrently
/// across sessions.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// The closed tool set
    pub registry: Arc<ToolRegistry>,
    /// OAuth code exchange, when configured
    pub oauth: Option<Arc<OAuthClient>>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config) -> Self {
        let timeout = Duration::from_secs(config.server.timeout);
        let oauth = if config.oauth.is_configured() {
            match OAuthClient::from_config(&config.oauth, timeout) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!("OAuth client disabled: {}", e);
                    None
                }
            }
        } else {
            debug!("OAuth not configured, token exchange will fail");
            None
        };

        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::standard()),
            oauth,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
