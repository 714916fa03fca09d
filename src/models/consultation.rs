use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ConsultationStatus;

/// One medication line of a consultation or prescription suggestion.
/// Fields other than `name` may be empty when the transcript did not
/// mention them; the clinician fills them in before saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub duration: String,
}

/// A clinician-patient encounter: the raw transcript plus the
/// structured fields extracted from it and the clinician's notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub patient_name: String,
    pub date: String,
    pub transcript: String,
    pub symptoms: Vec<String>,
    pub diagnosis: String,
    pub medications: Vec<MedicationEntry>,
    pub notes: String,
    pub status: ConsultationStatus,
}

/// Updatable fields for `PUT /api/consultations/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationUpdate {
    pub transcript: Option<String>,
    pub symptoms: Option<Vec<String>>,
    pub diagnosis: Option<String>,
    pub medications: Option<Vec<MedicationEntry>>,
    pub notes: Option<String>,
    pub status: Option<ConsultationStatus>,
}
