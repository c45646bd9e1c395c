//! Chat endpoint
//!
//! One request runs one turn: the model streams text and tool calls, server tools
//! run inline, and the turn pauses whenever a tool needs input from the user.

use super::{PAYMENTS_ENVIRONMENT_HEADER, PAYMENTS_KEY_HEADER, bearer_token, header_str};
use crate::core::chat::{ChatTurn, to_model_messages};
use crate::core::function_calling::ToolExecutor;
use crate::core::payments::{PaymentsClient, PaymentsEnvironment};
use crate::core::providers::{ProviderKind, create_provider};
use crate::core::streaming::{StreamingHandler, create_sse_response};
use crate::core::types::ChatRequest;
use crate::server::middleware::REQUEST_ID_HEADER;
use crate::server::state::AppState;
use crate::utils::error::{PaygentError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use std::time::Duration;
use tracing::{info, warn};

/// Configure chat routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/chat").route(web::post().to(chat)));
}

/// Run one chat turn and stream it back as Server-Sent Events
pub async fn chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    // Credentials are checked before anything else touches the body
    let api_key = bearer_token(&req).ok_or_else(|| {
        warn!("Chat request without an API key");
        PaygentError::unauthorized("Missing API key")
    })?;

    let request: ChatRequest =
        serde_json::from_slice(&body).map_err(|e| PaygentError::parsing(e.to_string()))?;

    let config = state.config();
    let kind = match request.provider.as_deref() {
        Some(name) => name.parse::<ProviderKind>().map_err(PaygentError::bad_request)?,
        None => config.providers.default_provider,
    };

    let payments_key = header_str(&req, PAYMENTS_KEY_HEADER)
        .map(str::to_string)
        .or_else(|| config.payments.api_secret.clone())
        .ok_or_else(|| PaygentError::unauthorized("Missing payments API key"))?;

    let environment = match header_str(&req, PAYMENTS_ENVIRONMENT_HEADER) {
        Some(value) => value
            .parse::<PaymentsEnvironment>()
            .map_err(PaygentError::bad_request)?,
        None => PaymentsEnvironment::default(),
    };

    let request_id = header_str(&req, REQUEST_ID_HEADER)
        .unwrap_or_default()
        .to_string();

    let provider = create_provider(kind, api_key, &config.providers)?;
    let payments = PaymentsClient::from_config(&config.payments, environment, payments_key)?;
    let executor = ToolExecutor::new(state.registry.clone(), payments);

    let messages = to_model_messages(&request.into_messages());
    info!(
        request_id = %request_id,
        provider = %kind,
        environment = %environment,
        messages = messages.len(),
        "Starting chat turn"
    );

    let turn = ChatTurn::new(
        provider,
        executor,
        config.providers.system_prompt.clone(),
        config.providers.max_steps,
    );
    let handler = StreamingHandler::new(request_id, Duration::from_secs(config.server.timeout));

    Ok(create_sse_response(handler.create_sse_stream(turn.run(messages))))
}
