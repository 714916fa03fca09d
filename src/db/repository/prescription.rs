use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::Prescription;

pub fn insert_prescription(
    conn: &Connection,
    prescription: &Prescription,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, user_id, name, dosage, frequency, duration,
         date, status, doctor_name, instructions)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            prescription.id.to_string(),
            prescription.user_id.to_string(),
            prescription.name,
            prescription.dosage,
            prescription.frequency,
            prescription.duration,
            prescription.date,
            prescription.status,
            prescription.doctor_name,
            prescription.instructions,
        ],
    )?;
    Ok(())
}

pub fn list_prescriptions_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, dosage, frequency, duration, date, status,
         doctor_name, instructions
         FROM prescriptions WHERE user_id = ?1 ORDER BY date DESC",
    )?;

    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, Option<String>>(7)?,
            row.get::<_, Option<String>>(8)?,
            row.get::<_, Option<String>>(9)?,
        ))
    })?;

    let mut prescriptions = Vec::new();
    for row in rows {
        let (id, user_id, name, dosage, frequency, duration, date, status, doctor_name, instructions) =
            row?;
        prescriptions.push(Prescription {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            name,
            dosage,
            frequency,
            duration,
            date,
            status,
            doctor_name,
            instructions,
        });
    }
    Ok(prescriptions)
}
