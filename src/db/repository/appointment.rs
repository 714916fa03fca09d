use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{Appointment, AppointmentStatus};

pub fn insert_appointment(
    conn: &Connection,
    appointment: &Appointment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, user_id, doctor, date, time, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            appointment.id.to_string(),
            appointment.user_id.to_string(),
            appointment.doctor,
            appointment.date,
            appointment.time,
            appointment.status.as_str(),
        ],
    )?;
    Ok(())
}

pub fn list_appointments_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, doctor, date, time, status
         FROM appointments WHERE user_id = ?1 ORDER BY date, time",
    )?;

    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut appointments = Vec::new();
    for row in rows {
        let (id, user_id, doctor, date, time, status) = row?;
        appointments.push(Appointment {
            id: Uuid::parse_str(&id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
            doctor,
            date,
            time,
            status: AppointmentStatus::from_str(&status)?,
        });
    }
    Ok(appointments)
}
