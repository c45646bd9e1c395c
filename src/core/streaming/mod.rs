//! Streaming response handling
//!
//! This module provides Server-Sent Events (SSE) encoding for the chat route and an
//! incremental decoder for reading SSE streams.

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use actix_web::{HttpResponse, web};
use crate::utils::error::Result;
use futures::stream::Stream;

// Module declarations
pub mod handler;
pub mod sse;
mod types;
pub mod utils;


pub use handler::StreamingHandler;
pub use sse::{SseDecoder, SseEvent};
pub use types::{ChatStreamPart, Event, FinishReason};
pub use utils::{DONE_MARKER, done_event, error_parts, is_done};

/// Create a Server-Sent Events response for Actix-web
pub fn create_sse_response<S>(stream: S) -> HttpResponse
where
    S: Stream<Item = Result<web::Bytes>> + Send + 'static,
{
    HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, "text/event-stream"))
        .insert_header((CACHE_CONTROL, "no-cache"))
        .insert_header(("Connection", "keep-alive"))
        .streaming(stream)
}
