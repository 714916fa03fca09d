use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Role;

/// A registered account: a patient, a doctor, or a dedicated caregiver.
/// Any account may additionally act as a caregiver for other users via
/// `care_links`; the role does not restrict that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub blood_type: Option<String>,
    pub profile_pic: Option<String>,
    /// Medical license number, doctors only.
    pub license_id: Option<String>,
    pub allergies: Vec<String>,
    pub conditions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update for `PUT /api/users/:id`. Absent fields are left
/// unchanged; the id, email, role, and created_at are immutable here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub blood_type: Option<String>,
    pub profile_pic: Option<String>,
    pub license_id: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub conditions: Option<Vec<String>>,
}
