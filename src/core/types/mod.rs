//! Core type definition module
//!
//! Conversation messages, tool calls and results, and the chat request body.

pub mod message;
pub mod requests;
pub mod tools;

// Re-export all public types
pub use message::*;
pub use requests::*;
pub use tools::*;
