use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Appointment, AppointmentStatus};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentQuery {
    pub user_id: Uuid,
}

/// `GET /api/appointments?userId=` — a user's appointments.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    let conn = ctx.open_db()?;
    let appointments = repository::list_appointments_for_user(&conn, &query.user_id)?;
    Ok(Json(appointments))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointment {
    pub user_id: Uuid,
    pub doctor: String,
    pub date: String,
    pub time: String,
    #[serde(default = "default_status")]
    pub status: AppointmentStatus,
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

/// `POST /api/appointments` — book an appointment.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(body): Json<CreateAppointment>,
) -> Result<Json<Appointment>, ApiError> {
    let appointment = Appointment {
        id: Uuid::new_v4(),
        user_id: body.user_id,
        doctor: body.doctor,
        date: body.date,
        time: body.time,
        status: body.status,
    };

    let conn = ctx.open_db()?;
    repository::insert_appointment(&conn, &appointment)?;
    Ok(Json(appointment))
}
