//! HTTP route modules
//!
//! Each module registers its resources through `configure_routes`.

pub mod auth;
pub mod chat;

use actix_web::HttpRequest;

/// Header carrying the payments API key
pub const PAYMENTS_KEY_HEADER: &str = "x-payman-api-key";

/// Header selecting the payments environment
pub const PAYMENTS_ENVIRONMENT_HEADER: &str = "x-payman-environment";

/// Read a header as a trimmed, non-empty string
pub fn header_str<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Extract the token from `Authorization: Bearer <token>`
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = header_str(req, "authorization")?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
