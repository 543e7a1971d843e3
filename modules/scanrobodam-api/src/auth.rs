use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AuthError;
use crate::AppState;

/// Proof that the request carried `Authorization: Bearer <secret>`.
/// Extract this in every handler; a missing or non-Bearer header is
/// rejected with 401, a wrong token with 403.
pub struct ApiKey;

impl FromRequestParts<Arc<AppState>> for ApiKey {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let token = bearer_token(header).ok_or(AuthError::MissingToken)?;

        if constant_time_eq(token.as_bytes(), state.config.api_secret.as_bytes()) {
            Ok(ApiKey)
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ")
}

/// Constant-time comparison to prevent timing attacks.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
