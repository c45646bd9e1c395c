//! Integration tests for paygent
//!
//! These tests run the real handlers and session against wiremock stand-ins for
//! the LLM backends, the payments API and the OAuth token endpoint.

pub mod chat_route_tests;
pub mod config_tests;
pub mod error_handling_tests;
pub mod oauth_tests;
pub mod session_flow_tests;
pub mod tool_dispatch_tests;
