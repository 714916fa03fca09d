use serde::{Deserialize, Serialize};

use super::client::CompletionClient;

/// Fallback demo video when the model cannot name a specific one.
const DEFAULT_FIRST_AID_VIDEO: &str = "https://www.youtube.com/watch?v=OSPIIcB2bQA";

const IMAGE_ANALYSIS_SYSTEM: &str = "You are a medical AI assistant. Analyze the uploaded \
image for skin, hair, wounds, burns, or allergies. You must respond in the following JSON \
format: { \"severity\": \"mild/moderate/severe/critical\", \"diagnosis\": \"short diagnosis\", \
\"remedies\": { \"traditional\": \"traditional remedies\", \"modern\": \"modern remedies\" }, \
\"healingTime\": \"estimated healing time\", \"warning\": \"warning if serious, else empty string\" }";

const IMAGE_ANALYSIS_PROMPT: &str =
    "Analyze this image and provide the required information in the specified JSON format.";

const FIRST_AID_SYSTEM: &str = "You are a first aid assistant. For any given symptom or \
emergency, provide clear, step-by-step first aid instructions. Always include a relevant \
video link for a demo as the field videoUrl. Respond in JSON with keys: instructions, videoUrl.";

const PRESCRIPTION_SYSTEM: &str = "You are a helpful medical assistant.";

/// Structured result of analyzing a patient-submitted photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    pub severity: String,
    pub diagnosis: String,
    pub remedies: Remedies,
    pub healing_time: String,
    #[serde(default)]
    pub warning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remedies {
    pub traditional: String,
    pub modern: String,
}

impl ImageAnalysis {
    /// Placeholder payload used whenever the service fails or its
    /// response cannot be parsed into the required shape.
    pub fn unavailable() -> Self {
        Self {
            severity: "unknown".to_string(),
            diagnosis: "Analysis unavailable".to_string(),
            remedies: Remedies {
                traditional: "Consult a healthcare professional.".to_string(),
                modern: "Consult a healthcare professional.".to_string(),
            },
            healing_time: "unknown".to_string(),
            warning: "The image could not be analyzed automatically. Please consult a clinician."
                .to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.severity.is_empty()
            && !self.diagnosis.is_empty()
            && !self.remedies.traditional.is_empty()
            && !self.remedies.modern.is_empty()
            && !self.healing_time.is_empty()
    }
}

/// First aid guidance for one symptom or emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstAidGuide {
    pub instructions: String,
    #[serde(default)]
    pub video_url: String,
}

/// Analyze a patient-submitted image. Never fails: service errors and
/// malformed responses degrade to [`ImageAnalysis::unavailable`].
pub fn analyze_image(
    client: &dyn CompletionClient,
    mime_type: &str,
    image: &[u8],
) -> ImageAnalysis {
    let response = match client.chat_with_image(
        IMAGE_ANALYSIS_SYSTEM,
        IMAGE_ANALYSIS_PROMPT,
        mime_type,
        image,
    ) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "Image analysis call failed");
            return ImageAnalysis::unavailable();
        }
    };

    match parse_json_response::<ImageAnalysis>(&response) {
        Some(analysis) if analysis.is_complete() => analysis,
        Some(_) => {
            tracing::warn!("Image analysis response missing required fields");
            ImageAnalysis::unavailable()
        }
        None => {
            tracing::warn!("Image analysis response was not valid JSON");
            ImageAnalysis::unavailable()
        }
    }
}

/// First aid instructions for a symptom. Parse failures degrade to the
/// raw response text; a missing video link gets the default demo.
pub fn first_aid_guide(client: &dyn CompletionClient, symptom: &str) -> FirstAidGuide {
    let user = format!("First aid instructions for: {symptom}");
    let response = match client.chat(FIRST_AID_SYSTEM, &user) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "First aid call failed");
            return FirstAidGuide {
                instructions:
                    "First aid guidance is temporarily unavailable. If this is an emergency, \
                     call your local emergency number."
                        .to_string(),
                video_url: DEFAULT_FIRST_AID_VIDEO.to_string(),
            };
        }
    };

    let mut guide = match parse_json_response::<FirstAidGuide>(&response) {
        Some(guide) => guide,
        None => FirstAidGuide {
            instructions: response,
            video_url: String::new(),
        },
    };
    if guide.video_url.is_empty() {
        guide.video_url = DEFAULT_FIRST_AID_VIDEO.to_string();
    }
    guide
}

/// Free-text prescription suggestion from symptoms and condition.
pub fn suggest_prescription(
    client: &dyn CompletionClient,
    symptoms: &str,
    condition: &str,
) -> String {
    let prompt = format!(
        "Based on the following symptoms and condition, suggest a prescription with \
         medicine names, dosages, and brief instructions.\n\nSymptoms: {symptoms}\n\
         Condition: {condition}\n\nFormat:\n- Medicine Name (Dosage, Frequency, Duration): Instructions"
    );
    match client.chat(PRESCRIPTION_SYSTEM, &prompt) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Prescription suggestion call failed");
            "Unable to generate a prescription suggestion right now. Please enter the \
             prescription manually."
                .to_string()
        }
    }
}

/// Parse a JSON payload out of a completion response, tolerating a
/// json-fenced code block around it.
fn parse_json_response<T: for<'de> Deserialize<'de>>(response: &str) -> Option<T> {
    let trimmed = response.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let fence_start = trimmed.find("```json")? + 7;
    let fence_len = trimmed[fence_start..].find("```")?;
    serde_json::from_str(trimmed[fence_start..fence_start + fence_len].trim()).ok()
}
