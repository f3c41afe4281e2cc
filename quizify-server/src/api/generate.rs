//! Question generation endpoints

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use quizify_common::db::UNKNOWN_FILE_NAME;
use quizify_common::GeneratedQuestion;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::{ApiError, ApiJson};
use crate::{ingest, AppState};

/// Multipart field carrying the document
const PDF_FIELD: &str = "pdf";

/// Header naming the uploaded document
const FILE_NAME_HEADER: &str = "file-name";

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    /// Raw model output, not validated or stored
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub questions: Vec<GeneratedQuestion>,
}

/// POST /text
///
/// Passes the prompt straight to the model and returns its raw text.
pub async fn generate_text(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TextRequest>,
) -> Result<Json<TextResponse>, ApiError> {
    let response = state.generator.generate(&request.prompt).await?;
    Ok(Json(TextResponse { response }))
}

/// POST /upload-pdf
///
/// Multipart field `pdf`; optional `file-name` header names the document
/// (defaults to `unknown.pdf`). Generated questions are stored before the
/// response is sent.
pub async fn upload_pdf(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let file_name = headers
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_FILE_NAME)
        .to_string();

    let mut document: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart data: {}", e)))?
    {
        if field.name() == Some(PDF_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            document = Some(bytes.to_vec());
            break;
        }
    }

    let document = document
        .ok_or_else(|| ApiError::BadRequest(format!("Missing '{}' file field", PDF_FIELD)))?;

    info!(file_name = %file_name, bytes = document.len(), "Received PDF upload");

    let batch = ingest::ingest_document(&state, &file_name, document).await?;

    Ok(Json(UploadResponse {
        questions: batch.questions,
    }))
}
