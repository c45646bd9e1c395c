//! # Paygent
//!
//! A chat service where an LLM assistant moves money through a payments API.
//!
//! The model is given a closed set of payment tools. Tools that have everything they
//! need run on the server against the payments API; tools that need more input from
//! the user pause the turn with a form request, and the client answers it on the next
//! turn by submitting a form.
//!
//! ## Features
//!
//! - **Streaming chat**: `POST /api/chat` streams text and tool activity as Server-Sent Events
//! - **Multi-Provider**: OpenAI and Anthropic behind one `ChatProvider` trait
//! - **Human in the loop**: form requests for amounts, recipients and payees
//! - **OAuth**: `POST /api/auth/token` exchanges authorization codes
//! - **Client SDK**: `ChatClient` and `ChatSession` drive the protocol from any front end
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use paygent::{Config, Paygent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/paygent.yaml").await?;
//!     let service = Paygent::new(config)?;
//!     service.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod auth;
pub mod config;
pub mod core;
pub mod sdk;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{PaygentError, Result};

// Conversation and protocol types
pub use core::streaming::{ChatStreamPart, FinishReason};
pub use core::types::{ChatRequest, Message, Role, ToolCall, ToolInvocation, ToolResult};

// Tools, providers and client state
pub use core::forms::{Form, FormError, ToolResultView, render_tool_result};
pub use core::function_calling::{ToolExecutor, ToolName, ToolRegistry};
pub use core::providers::{ChatProvider, ProviderError, ProviderKind};
pub use core::session::{ChatSession, ClientSettings, SessionError, SessionStatus};
pub use sdk::{ChatClient, SdkError};

use tracing::info;

/// The chat service
pub struct Paygent {
    server: server::HttpServer,
}

impl Paygent {
    /// Create a new service instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new Paygent instance");
        let server = server::HttpServer::new(&config)?;
        Ok(Self { server })
    }

    /// Run the HTTP server until shutdown
    pub async fn run(self) -> Result<()> {
        info!(version = VERSION, "Starting Paygent");
        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
