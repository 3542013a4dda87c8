use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Bearer-token authentication.
///
/// Expects `Authorization: Bearer <token>` and checks it against the
/// configured `API_TOKENS`. When no tokens are configured every request
/// passes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let valid_tokens = &state.config.api_tokens;
    if valid_tokens.is_empty() {
        return Ok(next.run(request).await);
    }

    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized(
            "Missing Authorization header. Please provide a Bearer token.",
        ))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header format."))?;

    let provided_token = auth_str
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized(
            "Authorization header must use Bearer scheme (e.g., 'Authorization: Bearer <token>').",
        ))?
        .trim();

    if !is_well_formed_token(provided_token) {
        return Err(ApiError::Unauthorized("Invalid token format."));
    }

    if !valid_tokens.iter().any(|t| t == provided_token) {
        return Err(ApiError::Unauthorized("Invalid or expired token."));
    }

    Ok(next.run(request).await)
}

/// Tokens are at least 32 characters of alphanumerics, hyphens and underscores.
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() >= 32
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
