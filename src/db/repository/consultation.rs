use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Consultation, ConsultationStatus, ConsultationUpdate, MedicationEntry};

use super::{from_json_list, to_json_list, OptionalRow};

const CONSULTATION_COLUMNS: &str = "id, doctor_id, patient_id, patient_name, date, transcript,
     symptoms, diagnosis, medications, notes, status";

fn medications_to_json(medications: &[MedicationEntry]) -> String {
    serde_json::to_string(medications).unwrap_or_else(|_| "[]".to_string())
}

fn medications_from_json(raw: &str) -> Vec<MedicationEntry> {
    serde_json::from_str(raw).unwrap_or_default()
}

type ConsultationRow = (
    String, String, String, String, String, String,
    String, String, String, String, String,
);

fn read_consultation_row(row: &Row<'_>) -> rusqlite::Result<ConsultationRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
    ))
}

fn consultation_from_row(row: ConsultationRow) -> Result<Consultation, DatabaseError> {
    let (
        id, doctor_id, patient_id, patient_name, date, transcript,
        symptoms, diagnosis, medications, notes, status,
    ) = row;
    Ok(Consultation {
        id: Uuid::parse_str(&id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        doctor_id: Uuid::parse_str(&doctor_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_id: Uuid::parse_str(&patient_id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        patient_name,
        date,
        transcript,
        symptoms: from_json_list(&symptoms),
        diagnosis,
        medications: medications_from_json(&medications),
        notes,
        status: ConsultationStatus::from_str(&status)?,
    })
}

pub fn insert_consultation(
    conn: &Connection,
    consultation: &Consultation,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO consultations (id, doctor_id, patient_id, patient_name, date, transcript,
         symptoms, diagnosis, medications, notes, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            consultation.id.to_string(),
            consultation.doctor_id.to_string(),
            consultation.patient_id.to_string(),
            consultation.patient_name,
            consultation.date,
            consultation.transcript,
            to_json_list(&consultation.symptoms),
            consultation.diagnosis,
            medications_to_json(&consultation.medications),
            consultation.notes,
            consultation.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn get_consultation(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<Consultation>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONSULTATION_COLUMNS} FROM consultations WHERE id = ?1"
    ))?;
    let row = stmt
        .query_row(params![id.to_string()], read_consultation_row)
        .optional()?;
    row.map(consultation_from_row).transpose()
}

/// Apply a partial update; absent fields keep their stored values.
/// Returns false when no consultation with the given id exists.
pub fn update_consultation(
    conn: &Connection,
    id: &Uuid,
    update: &ConsultationUpdate,
) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE consultations SET
             transcript = COALESCE(?2, transcript),
             symptoms = COALESCE(?3, symptoms),
             diagnosis = COALESCE(?4, diagnosis),
             medications = COALESCE(?5, medications),
             notes = COALESCE(?6, notes),
             status = COALESCE(?7, status)
         WHERE id = ?1",
        params![
            id.to_string(),
            update.transcript,
            update.symptoms.as_deref().map(to_json_list),
            update.diagnosis,
            update.medications.as_deref().map(medications_to_json),
            update.notes,
            update.status.map(|s| s.as_str()),
        ],
    )?;
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    fn sample_consultation() -> Consultation {
        Consultation {
            id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            patient_name: "Asha Rao".to_string(),
            date: "2026-08-06".to_string(),
            transcript: "Patient presenting with fever.".to_string(),
            symptoms: vec!["fever".to_string()],
            diagnosis: "Common Cold".to_string(),
            medications: vec![MedicationEntry {
                name: "Amoxicillin".to_string(),
                dosage: "500mg".to_string(),
                frequency: "twice".to_string(),
                duration: "for 7 days".to_string(),
            }],
            notes: "Follow up in a week.".to_string(),
            status: ConsultationStatus::Completed,
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let consultation = sample_consultation();
        insert_consultation(&conn, &consultation).unwrap();

        let fetched = get_consultation(&conn, &consultation.id).unwrap().unwrap();
        assert_eq!(fetched.symptoms, vec!["fever".to_string()]);
        assert_eq!(fetched.medications.len(), 1);
        assert_eq!(fetched.medications[0].name, "Amoxicillin");
        assert_eq!(fetched.status, ConsultationStatus::Completed);
    }

    #[test]
    fn get_missing_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_consultation(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn update_replaces_only_named_fields() {
        let conn = open_memory_database().unwrap();
        let consultation = sample_consultation();
        insert_consultation(&conn, &consultation).unwrap();

        let update = ConsultationUpdate {
            diagnosis: Some("Influenza".to_string()),
            status: Some(ConsultationStatus::InProgress),
            ..Default::default()
        };
        assert!(update_consultation(&conn, &consultation.id, &update).unwrap());

        let fetched = get_consultation(&conn, &consultation.id).unwrap().unwrap();
        assert_eq!(fetched.diagnosis, "Influenza");
        assert_eq!(fetched.status, ConsultationStatus::InProgress);
        assert_eq!(fetched.symptoms, vec!["fever".to_string()]);
    }
}
