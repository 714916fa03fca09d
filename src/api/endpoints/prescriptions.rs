use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::Prescription;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionQuery {
    pub user_id: Uuid,
}

/// `GET /api/prescriptions?userId=` — a user's prescriptions.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<PrescriptionQuery>,
) -> Result<Json<Vec<Prescription>>, ApiError> {
    let conn = ctx.open_db()?;
    let prescriptions = repository::list_prescriptions_for_user(&conn, &query.user_id)?;
    Ok(Json(prescriptions))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescription {
    pub user_id: Uuid,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
    pub status: Option<String>,
    pub doctor_name: Option<String>,
    pub instructions: Option<String>,
}

/// `POST /api/prescriptions` — record a prescription.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(body): Json<CreatePrescription>,
) -> Result<Json<Prescription>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Medication name is required".into()));
    }

    let prescription = Prescription {
        id: Uuid::new_v4(),
        user_id: body.user_id,
        name: body.name,
        dosage: body.dosage,
        frequency: body.frequency,
        duration: body.duration,
        date: body.date,
        status: body.status,
        doctor_name: body.doctor_name,
        instructions: body.instructions,
    };

    let conn = ctx.open_db()?;
    repository::insert_prescription(&conn, &prescription)?;
    Ok(Json(prescription))
}
