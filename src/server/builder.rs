//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the binary.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{PaygentError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| PaygentError::config("Configuration is required"))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with an already loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config).build()?;
    let server_config = server.config();
    info!("Server starting at: http://{}", server_config.address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/chat - Chat turn (SSE)");
    info!("   POST /api/auth/token - OAuth code exchange");

    server.start().await
}
