//! AI proxy endpoints: transcription, image analysis, first aid,
//! prescription suggestion.
//!
//! The completion client blocks, so every call runs on a blocking
//! thread. Transcription failures surface to the caller; the analyses
//! degrade to placeholder payloads inside the `ai` module instead.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ai::{self, client::CompletionClient, FirstAidGuide, ImageAnalysis};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Run a blocking AI call off the async runtime.
async fn run_blocking<T, F>(client: Arc<dyn CompletionClient>, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn CompletionClient) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(client.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("AI task panicked: {e}")))
}

/// Pull the first matching field out of a multipart upload.
/// Returns (file_name, content_type, bytes).
async fn read_upload(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Option<(String, String, Vec<u8>)>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?;
        return Ok(Some((file_name, content_type, bytes.to_vec())));
    }
    Ok(None)
}

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

/// `POST /api/transcribe` — multipart `audio` field in, plain text out.
pub async fn transcribe(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let (file_name, _, audio) = read_upload(&mut multipart, "audio")
        .await?
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".into()))?;
    if audio.is_empty() {
        return Err(ApiError::BadRequest("No audio file provided".into()));
    }

    let text = run_blocking(ctx.ai.clone(), move |client| {
        client.transcribe(&file_name, audio)
    })
    .await??;

    Ok(Json(TranscriptionResponse { transcription: text }))
}

/// `POST /api/ai/analyze-image` — multipart `image` field in,
/// structured analysis out. Always 200: failures come back as the
/// placeholder payload.
pub async fn analyze_image(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<ImageAnalysis>, ApiError> {
    let (_, content_type, image) = read_upload(&mut multipart, "image")
        .await?
        .ok_or_else(|| ApiError::BadRequest("No image uploaded".into()))?;
    if image.is_empty() {
        return Err(ApiError::BadRequest("No image uploaded".into()));
    }

    let analysis = run_blocking(ctx.ai.clone(), move |client| {
        ai::analyze_image(client, &content_type, &image)
    })
    .await?;

    Ok(Json(analysis))
}

#[derive(Deserialize)]
pub struct FirstAidRequest {
    pub symptom: String,
}

/// `POST /api/first-aid` — step-by-step guidance for one symptom.
pub async fn first_aid(
    State(ctx): State<ApiContext>,
    Json(body): Json<FirstAidRequest>,
) -> Result<Json<FirstAidGuide>, ApiError> {
    if body.symptom.trim().is_empty() {
        return Err(ApiError::BadRequest("Symptom is required".into()));
    }

    let guide = run_blocking(ctx.ai.clone(), move |client| {
        ai::first_aid_guide(client, &body.symptom)
    })
    .await?;

    Ok(Json(guide))
}

#[derive(Deserialize)]
pub struct PrescriptionSuggestionRequest {
    pub symptoms: String,
    pub condition: String,
}

#[derive(Serialize)]
pub struct PrescriptionSuggestionResponse {
    pub suggestion: String,
}

/// `POST /api/ai/prescription` — free-text prescription suggestion.
pub async fn prescription(
    State(ctx): State<ApiContext>,
    Json(body): Json<PrescriptionSuggestionRequest>,
) -> Result<Json<PrescriptionSuggestionResponse>, ApiError> {
    let suggestion = run_blocking(ctx.ai.clone(), move |client| {
        ai::suggest_prescription(client, &body.symptoms, &body.condition)
    })
    .await?;

    Ok(Json(PrescriptionSuggestionResponse { suggestion }))
}
