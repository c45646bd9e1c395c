//! OAuth token exchange endpoint

use crate::core::types::TokenRequest;
use crate::server::state::AppState;
use crate::utils::error::{ErrorResponse, PaygentError, Result};
use actix_web::{HttpResponse, web};
use tracing::{error, info, warn};

/// Configure auth routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/auth/token").route(web::post().to(exchange_token)));
}

/// Exchange an authorization code for a token
pub async fn exchange_token(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let request: TokenRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Malformed token request: {}", e);
        PaygentError::token_exchange(e.to_string())
    })?;

    let Some(code) = request.code.filter(|c| !c.trim().is_empty()) else {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Authorization code is required".to_string(),
            code: "BAD_REQUEST".to_string(),
        }));
    };

    let Some(oauth) = state.oauth.as_ref() else {
        error!("Token exchange requested but OAuth is not configured");
        return Err(PaygentError::token_exchange("OAuth client is not configured"));
    };

    let token = oauth.exchange_code(&code).await?;
    info!("Authorization code exchanged");
    Ok(HttpResponse::Ok().json(token))
}
