//! Utility functions for streaming

use super::types::{ChatStreamPart, Event, FinishReason};

/// Data payload that terminates a stream
pub const DONE_MARKER: &str = "[DONE]";

/// Check if SSE data marks the end of the stream
pub fn is_done(data: &str) -> bool {
    data.trim() == DONE_MARKER
}

/// Final `data: [DONE]` event
pub fn done_event() -> Event {
    Event::default().data(DONE_MARKER)
}

/// Error part followed by a `finish {reason: error}` part
pub fn error_parts(error: impl Into<String>) -> [ChatStreamPart; 2] {
    [
        ChatStreamPart::Error {
            error: error.into(),
        },
        ChatStreamPart::Finish {
            reason: FinishReason::Error,
        },
    ]
}
