//! Core functionality for Paygent
//!
//! This module contains the chat domain: conversation types, the tool registry and
//! executor, LLM providers, the payments client, and the client-side session and forms.

pub mod chat; // Chat turn orchestration
pub mod forms; // Tool form rendering and submission
pub mod function_calling; // Tool registry and dispatch
pub mod payments; // Payments API client
pub mod providers; // LLM backends
pub mod session; // Client-side conversation state
pub mod streaming; // SSE encoding and decoding
pub mod types;
