//! Consultation endpoints: chunk-by-chunk extraction plus record CRUD.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::consultation::ExtractedConsultation;
use crate::db::repository;
use crate::models::{Consultation, ConsultationStatus, ConsultationUpdate, MedicationEntry};

#[derive(Deserialize)]
pub struct ExtractRequest {
    /// The session's draft so far; omit to start a fresh one.
    #[serde(default)]
    pub draft: ExtractedConsultation,
    /// The newly transcribed chunk. Null or blank contributes nothing.
    pub chunk: Option<String>,
}

/// `POST /api/consultations/extract` — merge one transcript chunk into
/// the draft and return it. Chunks must be submitted in arrival order;
/// the draft travels with the request, so there is no server-side
/// session state to race on.
pub async fn extract(
    State(ctx): State<ApiContext>,
    Json(body): Json<ExtractRequest>,
) -> Json<ExtractedConsultation> {
    let mut draft = body.draft;
    if let Some(chunk) = body.chunk.as_deref() {
        ctx.extractor.apply_chunk(&mut draft, chunk);
    }
    Json(draft)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultation {
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub date: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_status")]
    pub status: ConsultationStatus,
}

fn default_status() -> ConsultationStatus {
    ConsultationStatus::Completed
}

/// `POST /api/consultations` — save an encounter record.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(body): Json<CreateConsultation>,
) -> Result<Json<Consultation>, ApiError> {
    let consultation = Consultation {
        id: Uuid::new_v4(),
        doctor_id: body.doctor_id,
        patient_id: body.patient_id,
        patient_name: body.patient_name,
        date: body.date,
        transcript: body.transcript,
        symptoms: body.symptoms,
        diagnosis: body.diagnosis,
        medications: body.medications,
        notes: body.notes,
        status: body.status,
    };

    let conn = ctx.open_db()?;
    repository::insert_consultation(&conn, &consultation)?;
    Ok(Json(consultation))
}

/// `GET /api/consultations/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(consultation_id): Path<Uuid>,
) -> Result<Json<Consultation>, ApiError> {
    let conn = ctx.open_db()?;
    let consultation = repository::get_consultation(&conn, &consultation_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Consultation {consultation_id} not found")))?;
    Ok(Json(consultation))
}

/// `PUT /api/consultations/:id` — update edited fields.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(consultation_id): Path<Uuid>,
    Json(body): Json<ConsultationUpdate>,
) -> Result<Json<Consultation>, ApiError> {
    let conn = ctx.open_db()?;
    if !repository::update_consultation(&conn, &consultation_id, &body)? {
        return Err(ApiError::NotFound(format!(
            "Consultation {consultation_id} not found"
        )));
    }
    let consultation = repository::get_consultation(&conn, &consultation_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Consultation {consultation_id} not found")))?;
    Ok(Json(consultation))
}
