//! Utility modules for Paygent
//!
//! Error types, logging setup and small string helpers shared across the crate.

pub mod error; // Error handling
pub mod logging; // Tracing subscriber and secret masking

use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static EMAIL_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"#).ok());

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Generate a message ID in the form used by chat clients
pub fn generate_message_id() -> String {
    format!("msg_{}", Uuid::new_v4().simple())
}

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Check if a string is a valid URL
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url).is_ok()
}

/// Check if a string is a valid email
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}
