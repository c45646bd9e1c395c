//! Client SDK for the chat service
//!
//! Posts conversations to `/api/chat` and decodes the streamed reply back into
//! `ChatStreamPart`s that a `ChatSession` can apply.

pub mod client;
pub mod errors;

// Re-exports for convenience
pub use client::{ChatClient, PartStream, part_stream};
pub use errors::{Result, SdkError};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
