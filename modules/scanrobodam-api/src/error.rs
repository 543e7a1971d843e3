use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use scanrobodam_common::ExtractError;
use tracing::warn;

/// Bearer-token failures. Kept apart from [`ApiError`] because they are the
/// only failures with their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "API key not provided"),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid API key"),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// Any extraction failure. Always rendered as 500 `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(pub ExtractError);

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        warn!(error = %message, "Invoice extraction failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}
