//! Streaming response handler implementation

use super::types::ChatStreamPart;
use super::utils::{done_event, error_parts};
use crate::utils::error::Result;
use actix_web::web;
use futures::stream::{Stream, StreamExt};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

/// Forwards chat stream parts to an SSE response body
pub struct StreamingHandler {
    /// Request ID for tracking
    request_id: String,
    /// Cap on the whole turn
    timeout: Duration,
}

impl StreamingHandler {
    /// Create a new streaming handler
    pub fn new(request_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            request_id: request_id.into(),
            timeout,
        }
    }

    /// Create the SSE body for a stream of chat parts
    ///
    /// The parts are driven on a spawned task so a slow client never stalls the
    /// turn. The body always ends with `data: [DONE]`.
    pub fn create_sse_stream<S>(self, parts: S) -> impl Stream<Item = Result<web::Bytes>>
    where
        S: Stream<Item = ChatStreamPart> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<Result<web::Bytes>>(100);

        tokio::spawn(async move {
            let start = Instant::now();
            let forward = async {
                tokio::pin!(parts);
                while let Some(part) = parts.next().await {
                    if tx.send(Ok(part.to_event().to_bytes())).await.is_err() {
                        // Client went away
                        return false;
                    }
                }
                true
            };

            match tokio::time::timeout(self.timeout, forward).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!(request_id = %self.request_id, "Client disconnected mid-stream");
                    return;
                }
                Err(_) => {
                    warn!(
                        request_id = %self.request_id,
                        timeout = ?self.timeout,
                        "Chat turn timed out"
                    );
                    for part in error_parts("Request timed out") {
                        let _ = tx.send(Ok(part.to_event().to_bytes())).await;
                    }
                }
            }

            let _ = tx.send(Ok(done_event().to_bytes())).await;
            debug!(
                request_id = %self.request_id,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Stream complete"
            );
        });

        ReceiverStream::new(rx)
    }
}
