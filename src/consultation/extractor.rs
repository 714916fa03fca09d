use regex::Regex;

use crate::models::MedicationEntry;

use super::ExtractedConsultation;

/// Heuristic field extraction over consultation transcript chunks.
///
/// Each field group is tried pattern-by-pattern in a fixed order and
/// the first pattern that matches anywhere in the chunk wins; the
/// captured text runs to the next period. Pure text processing — the
/// only state in the extractor is its compiled patterns.
pub struct TranscriptExtractor {
    symptom_patterns: [Regex; 3],
    diagnosis_patterns: [Regex; 3],
    medication_patterns: [Regex; 3],
    list_separator: Regex,
    dosage: Regex,
    frequency: Regex,
    duration: Regex,
}

impl TranscriptExtractor {
    pub fn new() -> Self {
        let compile = |pattern: &str| Regex::new(pattern).expect("valid extraction pattern");
        Self {
            symptom_patterns: [
                compile(r"(?i)symptoms?:?\s*([^.]+)"),
                compile(r"(?i)complains of\s*([^.]+)"),
                compile(r"(?i)presenting with\s*([^.]+)"),
            ],
            diagnosis_patterns: [
                compile(r"(?i)diagnosis:?\s*([^.]+)"),
                compile(r"(?i)assessment:?\s*([^.]+)"),
                compile(r"(?i)impression:?\s*([^.]+)"),
            ],
            medication_patterns: [
                compile(r"(?i)medications?:?\s*([^.]+)"),
                compile(r"(?i)prescribe:?\s*([^.]+)"),
                compile(r"(?i)treatment:?\s*([^.]+)"),
            ],
            list_separator: compile(r",\s*|\sand\s"),
            dosage: compile(r"(?i)\d+\s*mg|\d+\s*ml"),
            frequency: compile(r"(?i)once|twice|three times|daily|weekly|monthly|every \d+ hours"),
            duration: compile(r"(?i)for \d+ days|for \d+ weeks|for \d+ months"),
        }
    }

    /// Merge one transcribed chunk into the draft.
    ///
    /// A blank chunk is a no-op. Otherwise the chunk always lands in
    /// `notes`, and whichever field groups match contribute symptoms
    /// (set-union), a diagnosis (replace), and medications (append).
    pub fn apply_chunk(&self, draft: &mut ExtractedConsultation, chunk: &str) {
        if chunk.trim().is_empty() {
            return;
        }

        if let Some(text) = first_capture(&self.symptom_patterns, chunk) {
            for symptom in self.split_list(text) {
                draft.add_symptom(symptom);
            }
        }

        if let Some(text) = first_capture(&self.diagnosis_patterns, chunk) {
            draft.diagnosis = text.trim().to_string();
        }

        if let Some(text) = first_capture(&self.medication_patterns, chunk) {
            for phrase in self.split_list(text) {
                draft.medications.push(self.parse_medication(&phrase));
            }
        }

        draft.append_notes(chunk);
    }

    fn split_list(&self, text: &str) -> Vec<String> {
        self.list_separator
            .split(text.trim())
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(String::from)
            .collect()
    }

    /// Pull dosage/frequency/duration tokens out of one medication
    /// phrase. The name is whatever precedes the dosage token.
    fn parse_medication(&self, phrase: &str) -> MedicationEntry {
        let dosage = self
            .dosage
            .find(phrase)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let frequency = self
            .frequency
            .find(phrase)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let duration = self
            .duration
            .find(phrase)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let name = self
            .dosage
            .splitn(phrase, 2)
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        MedicationEntry {
            name,
            dosage,
            frequency,
            duration,
        }
    }
}

impl Default for TranscriptExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn first_capture<'a>(patterns: &[Regex], chunk: &'a str) -> Option<&'a str> {
    patterns
        .iter()
        .find_map(|re| re.captures(chunk).and_then(|c| c.get(1)).map(|m| m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(chunks: &[&str]) -> ExtractedConsultation {
        let extractor = TranscriptExtractor::new();
        let mut draft = ExtractedConsultation::default();
        for chunk in chunks {
            extractor.apply_chunk(&mut draft, chunk);
        }
        draft
    }

    #[test]
    fn full_consultation_chunk() {
        let draft = extract(&[
            "Patient presenting with fever, cough and fatigue. Diagnosis: Common Cold. \
             Prescribe Amoxicillin 500mg three times daily for 7 days.",
        ]);

        assert_eq!(draft.symptoms, vec!["fever", "cough", "fatigue"]);
        assert_eq!(draft.diagnosis, "Common Cold");
        assert_eq!(
            draft.medications,
            vec![MedicationEntry {
                name: "Amoxicillin".to_string(),
                dosage: "500mg".to_string(),
                frequency: "three times".to_string(),
                duration: "for 7 days".to_string(),
            }]
        );
    }

    #[test]
    fn symptom_extraction_is_idempotent() {
        let chunk = "Patient complains of headache and nausea.";
        let once = extract(&[chunk]);
        let twice = extract(&[chunk, chunk]);
        assert_eq!(once.symptoms, twice.symptoms);
        assert_eq!(twice.symptoms, vec!["headache", "nausea"]);
    }

    #[test]
    fn symptoms_union_preserves_first_appearance_order() {
        let draft = extract(&[
            "Symptoms: fever, cough.",
            "Patient also complains of fatigue, fever.",
        ]);
        assert_eq!(draft.symptoms, vec!["fever", "cough", "fatigue"]);
    }

    #[test]
    fn first_symptom_pattern_wins_within_a_chunk() {
        // Both groups appear; only the higher-priority "symptoms" pattern runs.
        let draft = extract(&["Symptoms: headache. Patient complains of nausea."]);
        assert_eq!(draft.symptoms, vec!["headache"]);
    }

    #[test]
    fn diagnosis_is_last_write_wins() {
        let draft = extract(&[
            "Diagnosis: Common Cold.",
            "Revised assessment: Influenza A.",
        ]);
        assert_eq!(draft.diagnosis, "Influenza A");
    }

    #[test]
    fn diagnosis_falls_back_to_impression() {
        let draft = extract(&["Impression: viral pharyngitis."]);
        assert_eq!(draft.diagnosis, "viral pharyngitis");
    }

    #[test]
    fn medications_are_not_deduplicated() {
        let chunk = "Prescribe Amoxicillin 500mg twice daily for 7 days.";
        let draft = extract(&[chunk, chunk]);

        assert_eq!(draft.medications.len(), 2);
        let expected = MedicationEntry {
            name: "Amoxicillin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "twice".to_string(),
            duration: "for 7 days".to_string(),
        };
        assert_eq!(draft.medications[0], expected);
        assert_eq!(draft.medications[1], expected);
    }

    #[test]
    fn medication_list_splits_on_comma_and_and() {
        let draft = extract(&[
            "Medications: Ibuprofen 200mg twice daily, Cetirizine 10mg daily and Paracetamol 500mg.",
        ]);
        let names: Vec<&str> = draft.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ibuprofen", "Cetirizine", "Paracetamol"]);
        assert_eq!(draft.medications[1].dosage, "10mg");
        assert_eq!(draft.medications[1].frequency, "daily");
        assert_eq!(draft.medications[2].duration, "");
    }

    #[test]
    fn medication_without_dosage_keeps_full_phrase_as_name() {
        let draft = extract(&["Treatment: bed rest."]);
        assert_eq!(draft.medications.len(), 1);
        assert_eq!(draft.medications[0].name, "bed rest");
        assert_eq!(draft.medications[0].dosage, "");
    }

    #[test]
    fn ml_dosage_and_hourly_frequency() {
        let draft = extract(&["Prescribe cough syrup 10ml every 6 hours for 3 days."]);
        assert_eq!(draft.medications[0].name, "cough syrup");
        assert_eq!(draft.medications[0].dosage, "10ml");
        assert_eq!(draft.medications[0].frequency, "every 6 hours");
        assert_eq!(draft.medications[0].duration, "for 3 days");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let draft = extract(&["PRESENTING WITH CHILLS. DIAGNOSIS: FLU."]);
        assert_eq!(draft.symptoms, vec!["CHILLS"]);
        assert_eq!(draft.diagnosis, "FLU");
    }

    #[test]
    fn unmatched_chunk_still_lands_in_notes() {
        let draft = extract(&["Patient seems comfortable today."]);
        assert!(draft.symptoms.is_empty());
        assert_eq!(draft.diagnosis, "");
        assert!(draft.medications.is_empty());
        assert_eq!(draft.notes, "Patient seems comfortable today.");
    }

    #[test]
    fn notes_accumulate_across_chunks() {
        let draft = extract(&["Symptoms: fever.", "Resting comfortably."]);
        assert_eq!(draft.notes, "Symptoms: fever. Resting comfortably.");
    }

    #[test]
    fn blank_chunk_is_a_noop() {
        let extractor = TranscriptExtractor::new();
        let mut draft = extract(&["Symptoms: fever."]);
        let before = draft.clone();

        extractor.apply_chunk(&mut draft, "");
        extractor.apply_chunk(&mut draft, "   \n");
        assert_eq!(draft, before);
    }

    #[test]
    fn capture_stops_at_the_next_period() {
        let draft = extract(&["Symptoms: fever. The patient traveled recently."]);
        assert_eq!(draft.symptoms, vec!["fever"]);
    }

    #[test]
    fn later_chunk_extends_an_earlier_draft() {
        let draft = extract(&[
            "Patient complains of sore throat.",
            "Assessment: strep throat. Prescribe Penicillin 250mg twice daily for 10 days.",
        ]);
        assert_eq!(draft.symptoms, vec!["sore throat"]);
        assert_eq!(draft.diagnosis, "strep throat");
        assert_eq!(draft.medications[0].name, "Penicillin");
    }
}
