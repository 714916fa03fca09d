//! User endpoints: signup, fetch, partial profile update.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository;
use crate::models::{Role, User, UserUpdate};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub blood_type: Option<String>,
    pub profile_pic: Option<String>,
    pub license_id: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<String>,
}

/// `POST /api/users` — create an account.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(body): Json<CreateUser>,
) -> Result<Json<User>, ApiError> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() {
        return Err(ApiError::BadRequest("Name and email are required".into()));
    }

    let conn = ctx.open_db()?;
    if repository::find_user_by_email(&conn, &body.email)?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".into()));
    }

    let user = User {
        id: Uuid::new_v4(),
        name: body.name,
        email: body.email,
        role: body.role,
        phone: body.phone,
        address: body.address,
        gender: body.gender,
        age: body.age,
        blood_type: body.blood_type,
        profile_pic: body.profile_pic,
        license_id: body.license_id,
        allergies: body.allergies,
        conditions: body.conditions,
        created_at: chrono::Utc::now(),
    };
    repository::insert_user(&conn, &user)?;

    Ok(Json(user))
}

/// `GET /api/users/:id` — fetch a user record.
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let conn = ctx.open_db()?;
    let user = repository::get_user(&conn, &user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(user))
}

/// `PUT /api/users/:id` — partial profile update; returns the updated
/// record.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let conn = ctx.open_db()?;
    if !repository::update_user(&conn, &user_id, &body)? {
        return Err(ApiError::NotFound(format!("User {user_id} not found")));
    }
    let user = repository::get_user(&conn, &user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("User {user_id} not found")))?;
    Ok(Json(user))
}
