pub mod extract;

use std::sync::Arc;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    response::Json,
    routing::{get, post},
    BoxError, Router,
};
use scanrobodam_common::ExtractError;
use tower::timeout::TimeoutLayer;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::auth::ApiKey;
use crate::error::ApiError;
use crate::AppState;

/// Upper bound for a single PDF upload.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn router(state: Arc<AppState>) -> Router {
    let request_timeout = state.config.request_timeout;

    Router::new()
        // Health check
        .route("/", get(health))
        // Extraction
        .route("/extract-invoice-text", post(extract::extract_invoice_text))
        .route(
            "/upload-pdf",
            post(extract::upload_pdf).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
        // Abandon polling when a request runs too long; answer like any other timeout
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(move |_: BoxError| async move {
                    ApiError(ExtractError::Timeout(request_timeout))
                }))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        // CORS
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Extracted invoices are never cacheable
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

pub async fn health(_key: ApiKey) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "service is running" }))
}
