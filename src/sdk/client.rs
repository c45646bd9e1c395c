//! HTTP client for the chat service

use super::errors::{Result, SdkError};
use crate::core::session::{ChatSession, ClientSettings, SessionStatus};
use crate::core::streaming::{ChatStreamPart, SseDecoder, is_done};
use crate::core::types::{ChatRequest, TokenRequest};
use crate::utils::error::ErrorResponse;
use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Stream of decoded chat parts
pub type PartStream = BoxStream<'static, Result<ChatStreamPart>>;

/// Client for `/api/chat` and `/api/auth/token`
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    base_url: String,
}

impl ChatClient {
    /// Create a client for a server base URL
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one chat request and stream the reply
    pub async fn send(
        &self,
        settings: &ClientSettings,
        request: &ChatRequest,
    ) -> Result<PartStream> {
        let api_key = settings
            .active_api_key()
            .ok_or_else(|| SdkError::MissingApiKey(settings.ai_provider.to_string()))?;

        let mut builder = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .bearer_auth(api_key)
            .header("x-payman-environment", settings.payman_mode.as_str())
            .json(request);
        if let Some(key) = settings.payman_api_key.as_deref().filter(|k| !k.is_empty()) {
            builder = builder.header("x-payman-api-key", key);
        }

        debug!(messages = request.messages.len(), "Sending chat request");
        let response = check_status(builder.send().await?).await?;
        Ok(part_stream(response.bytes_stream()))
    }

    /// Send a request and apply the reply to the session as it arrives
    ///
    /// `on_part` sees each part before the session does. Transport failures are
    /// recorded on the session as a banner and returned.
    pub async fn drive<F>(
        &self,
        session: &mut ChatSession,
        request: &ChatRequest,
        mut on_part: F,
    ) -> Result<SessionStatus>
    where
        F: FnMut(&ChatStreamPart),
    {
        let mut parts = match self.send(session.settings(), request).await {
            Ok(parts) => parts,
            Err(e) => {
                session.fail(e.to_string());
                return Err(e);
            }
        };

        while let Some(part) = parts.next().await {
            match part {
                Ok(part) => {
                    on_part(&part);
                    session.apply(part)?;
                }
                Err(e) => {
                    warn!("Chat stream failed: {}", e);
                    session.fail(e.to_string());
                    return Err(e);
                }
            }
        }

        if session.status() == SessionStatus::AwaitingModel {
            let e = SdkError::IncompleteStream;
            session.fail(e.to_string());
            return Err(e);
        }
        Ok(session.status())
    }

    /// Exchange an OAuth authorization code for a token
    pub async fn exchange_token(&self, code: &str) -> Result<Value> {
        let response = self
            .http
            .post(format!("{}/api/auth/token", self.base_url))
            .json(&TokenRequest {
                code: Some(code.to_string()),
            })
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(SdkError::ApiError {
        status: status.as_u16(),
        message,
    })
}

/// Decode an SSE byte stream into chat parts, stopping at `[DONE]`
pub fn part_stream<S>(bytes: S) -> PartStream
where
    S: Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut decoder = SseDecoder::new();
        tokio::pin!(bytes);

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(SdkError::HttpError(e));
                    return;
                }
            };
            for event in decoder.push(&chunk) {
                if is_done(&event.data) {
                    return;
                }
                yield decode_part(&event.data);
            }
        }

        if let Some(event) = decoder.finish() {
            if !is_done(&event.data) {
                yield decode_part(&event.data);
            }
        }
    })
}

fn decode_part(data: &str) -> Result<ChatStreamPart> {
    serde_json::from_str(data).map_err(|e| SdkError::ParseError(e.to_string()))
}
