//! Caregiver access endpoints.
//!
//! Thin HTTP shims over `care_circle`: a patient grants access by
//! caregiver email, revokes it by caregiver id, and either side lists
//! its links.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::care_circle;
use crate::db::repository::LinkedUser;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantRequest {
    pub caregiver_email: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// `POST /api/patients/:id/caregivers` — grant access by email.
pub async fn grant(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<Uuid>,
    Json(body): Json<GrantRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let conn = ctx.open_db()?;
    care_circle::grant_caregiver(&conn, &patient_id, &body.caregiver_email)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// `DELETE /api/patients/:id/caregivers/:caregiver_id` — revoke access.
pub async fn revoke(
    State(ctx): State<ApiContext>,
    Path((patient_id, caregiver_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let conn = ctx.open_db()?;
    care_circle::revoke_caregiver(&conn, &patient_id, &caregiver_id)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// `GET /api/patients/:id/caregivers` — caregivers with access to the
/// patient, in grant order.
pub async fn list_caregivers(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<LinkedUser>>, ApiError> {
    let conn = ctx.open_db()?;
    let caregivers = care_circle::caregivers_of(&conn, &patient_id)?;
    Ok(Json(caregivers))
}

/// `GET /api/caregivers/:id/patients` — patients the caregiver may view.
pub async fn list_patients(
    State(ctx): State<ApiContext>,
    Path(caregiver_id): Path<Uuid>,
) -> Result<Json<Vec<LinkedUser>>, ApiError> {
    let conn = ctx.open_db()?;
    let patients = care_circle::care_recipients_of(&conn, &caregiver_id)?;
    Ok(Json(patients))
}
