use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;

/// A `{id, name, email}` projection of a linked user, in grant order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LinkedUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Insert the patient->caregiver edge. `INSERT OR IGNORE` against the
/// UNIQUE(patient_id, caregiver_id) constraint gives set semantics:
/// repeated grants are no-ops. Returns true when a new edge was added.
pub fn insert_care_link(
    conn: &Connection,
    patient_id: &Uuid,
    caregiver_id: &Uuid,
) -> Result<bool, DatabaseError> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO care_links (id, patient_id, caregiver_id, granted_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            Uuid::new_v4().to_string(),
            patient_id.to_string(),
            caregiver_id.to_string(),
            chrono::Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(inserted > 0)
}

/// Delete the edge. Returns true when an edge existed; deleting an
/// absent edge is a no-op, not an error.
pub fn delete_care_link(
    conn: &Connection,
    patient_id: &Uuid,
    caregiver_id: &Uuid,
) -> Result<bool, DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM care_links WHERE patient_id = ?1 AND caregiver_id = ?2",
        params![patient_id.to_string(), caregiver_id.to_string()],
    )?;
    Ok(deleted > 0)
}

pub fn care_link_exists(
    conn: &Connection,
    patient_id: &Uuid,
    caregiver_id: &Uuid,
) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM care_links WHERE patient_id = ?1 AND caregiver_id = ?2",
        params![patient_id.to_string(), caregiver_id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Caregivers of a patient, in the order the grants were made.
pub fn list_caregivers_of(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<LinkedUser>, DatabaseError> {
    linked_users(
        conn,
        "SELECT u.id, u.name, u.email FROM care_links c
         JOIN users u ON u.id = c.caregiver_id
         WHERE c.patient_id = ?1 ORDER BY c.granted_at",
        patient_id,
    )
}

/// Patients a caregiver was granted access to, in grant order.
pub fn list_care_recipients_of(
    conn: &Connection,
    caregiver_id: &Uuid,
) -> Result<Vec<LinkedUser>, DatabaseError> {
    linked_users(
        conn,
        "SELECT u.id, u.name, u.email FROM care_links c
         JOIN users u ON u.id = c.patient_id
         WHERE c.caregiver_id = ?1 ORDER BY c.granted_at",
        caregiver_id,
    )
}

fn linked_users(
    conn: &Connection,
    sql: &str,
    id: &Uuid,
) -> Result<Vec<LinkedUser>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut users = Vec::new();
    for row in rows {
        let (id, name, email) = row?;
        users.push(LinkedUser {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            name,
            email,
        });
    }
    Ok(users)
}
