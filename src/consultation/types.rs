use serde::{Deserialize, Serialize};

use crate::models::MedicationEntry;

/// The running draft of structured consultation data for one clinician
/// session. Mutated by the extractor on every chunk and by direct
/// edits in the UI; persisted as part of a `Consultation` on save.
///
/// Merge contracts:
/// - `symptoms` — set semantics over an ordered list: first appearance
///   wins the position, repeats are dropped.
/// - `diagnosis` — last extraction wins, wholesale.
/// - `medications` — append-only; repeated mentions produce repeated
///   rows, corrected by manual edit.
/// - `notes` — every processed chunk is appended verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedConsultation {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    #[serde(default)]
    pub notes: String,
}

impl ExtractedConsultation {
    /// Insert a symptom unless an identical one is already present.
    pub(crate) fn add_symptom(&mut self, symptom: String) {
        if !symptom.is_empty() && !self.symptoms.contains(&symptom) {
            self.symptoms.push(symptom);
        }
    }

    /// Append a chunk to the free-text notes accumulator.
    pub(crate) fn append_notes(&mut self, chunk: &str) {
        if self.notes.is_empty() {
            self.notes.push_str(chunk);
        } else {
            self.notes.push(' ');
            self.notes.push_str(chunk);
        }
    }
}
