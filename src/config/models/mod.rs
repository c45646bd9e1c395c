//! Configuration data models
//!
//! This module defines all configuration structures used by the service.

#![allow(missing_docs)]

pub mod oauth;
pub mod payments;
pub mod provider;
pub mod server;

// Re-export all configuration types
pub use oauth::*;
pub use payments::*;
pub use provider::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default timeout in seconds, matching the chat route's streaming cap
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default number of model round-trips per chat turn
pub fn default_max_steps() -> u32 {
    5
}

/// Default payments API timeout in seconds
pub fn default_payments_timeout() -> u64 {
    15
}
