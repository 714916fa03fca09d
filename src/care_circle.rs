//! Caregiver access grants.
//!
//! A patient invites a caregiver by email; from then on both sides can
//! list the relationship. Grants live in the `care_links` edge table:
//! "caregivers of patient" and "patients of caregiver" are two queries
//! over one edge set, so the two views cannot disagree.
//!
//! Role checks are deliberately absent: any account can be granted
//! caregiver access to any other, including itself. The email lookup
//! is exact and case-sensitive.

use rusqlite::Connection;
use thiserror::Error;
use uuid::Uuid;

use crate::db::repository::{
    care_link_exists, delete_care_link, find_user_by_email, insert_care_link,
    list_care_recipients_of, list_caregivers_of, user_exists, LinkedUser,
};
use crate::db::DatabaseError;

#[derive(Debug, Error)]
pub enum CareCircleError {
    #[error("Caregiver not found")]
    CaregiverNotFound,

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Grant `caregiver_email`'s account access to the patient's records.
///
/// Looks the caregiver up by exact email; if no account matches,
/// nothing is written. Re-granting an existing link is a no-op.
pub fn grant_caregiver(
    conn: &Connection,
    patient_id: &Uuid,
    caregiver_email: &str,
) -> Result<(), CareCircleError> {
    let caregiver = find_user_by_email(conn, caregiver_email)?
        .ok_or(CareCircleError::CaregiverNotFound)?;

    if !user_exists(conn, patient_id)? {
        return Err(CareCircleError::UserNotFound(*patient_id));
    }

    let inserted = insert_care_link(conn, patient_id, &caregiver.id)?;
    if inserted {
        tracing::info!(patient = %patient_id, caregiver = %caregiver.id, "Caregiver access granted");
    }
    Ok(())
}

/// Remove the caregiver's access. Revoking a link that does not exist
/// is a no-op, not an error.
pub fn revoke_caregiver(
    conn: &Connection,
    patient_id: &Uuid,
    caregiver_id: &Uuid,
) -> Result<(), CareCircleError> {
    let removed = delete_care_link(conn, patient_id, caregiver_id)?;
    if removed {
        tracing::info!(patient = %patient_id, caregiver = %caregiver_id, "Caregiver access revoked");
    }
    Ok(())
}

/// Caregivers with access to this patient, in grant order.
pub fn caregivers_of(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<LinkedUser>, CareCircleError> {
    if !user_exists(conn, patient_id)? {
        return Err(CareCircleError::UserNotFound(*patient_id));
    }
    Ok(list_caregivers_of(conn, patient_id)?)
}

/// Patients this caregiver may view, in grant order.
pub fn care_recipients_of(
    conn: &Connection,
    caregiver_id: &Uuid,
) -> Result<Vec<LinkedUser>, CareCircleError> {
    if !user_exists(conn, caregiver_id)? {
        return Err(CareCircleError::UserNotFound(*caregiver_id));
    }
    Ok(list_care_recipients_of(conn, caregiver_id)?)
}

/// True when the caregiver currently has access to the patient.
pub fn has_access(
    conn: &Connection,
    patient_id: &Uuid,
    caregiver_id: &Uuid,
) -> Result<bool, CareCircleError> {
    Ok(care_link_exists(conn, patient_id, caregiver_id)?)
}
