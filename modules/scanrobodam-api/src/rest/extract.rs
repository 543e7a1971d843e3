use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use scanrobodam_common::ExtractError;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::auth::ApiKey;
use crate::error::ApiError;
use crate::pipeline::{self, ProcessingRequest};
use crate::AppState;

#[derive(Deserialize)]
pub struct InvoiceText {
    text: String,
}

pub async fn extract_invoice_text(
    State(state): State<Arc<AppState>>,
    _key: ApiKey,
    Json(body): Json<InvoiceText>,
) -> Result<Json<Value>, ApiError> {
    info!(chars = body.text.chars().count(), "Invoice text received");

    let request = ProcessingRequest::Text { text: body.text };
    let value = pipeline::process(
        state.assistants.as_ref(),
        &state.config.assistant_id,
        request,
    )
    .await?;

    Ok(Json(value))
}

pub async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    _key: ApiKey,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (file_name, bytes) = read_upload(&mut multipart).await?;
    info!(file_name = %file_name, size = bytes.len(), "Invoice file received");

    let request = ProcessingRequest::Pdf { bytes, file_name };
    let value = pipeline::process(
        state.assistants.as_ref(),
        &state.config.assistant_id,
        request,
    )
    .await?;

    Ok(Json(value))
}

/// First multipart field that carries a file name, as `(file_name, bytes)`.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ExtractError> {
    let invalid = |e: axum::extract::multipart::MultipartError| {
        ExtractError::Validation(format!("Invalid multipart upload: {e}"))
    };

    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(invalid)?;
        return Ok((file_name, bytes.to_vec()));
    }

    Err(ExtractError::Validation(
        "No file was uploaded; send the PDF as a multipart file field named 'pdf'".to_string(),
    ))
}
