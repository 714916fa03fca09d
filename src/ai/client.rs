use serde::Deserialize;
use serde_json::json;

use crate::config::AiSettings;

use super::AiError;

/// Client for an OpenAI-compatible completion + transcription service.
///
/// All methods block; API handlers must call them through
/// `tokio::task::spawn_blocking`.
pub trait CompletionClient: Send + Sync {
    /// Plain text completion with a system prompt.
    fn chat(&self, system: &str, user: &str) -> Result<String, AiError>;

    /// Vision completion: the prompt plus one image, passed inline as
    /// a base64 data URL.
    fn chat_with_image(
        &self,
        system: &str,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String, AiError>;

    /// Speech-to-text on a single audio payload.
    fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String, AiError>;
}

/// HTTP client for a hosted OpenAI-compatible API.
pub struct OpenAiClient {
    settings: AiSettings,
}

impl OpenAiClient {
    pub fn new(settings: AiSettings) -> Self {
        Self {
            settings: AiSettings {
                base_url: settings.base_url.trim_end_matches('/').to_string(),
                ..settings
            },
        }
    }

    /// Build a fresh blocking HTTP client. Constructed per call so the
    /// struct can be created on the async runtime while requests run
    /// on blocking threads.
    fn http(&self) -> Result<reqwest::blocking::Client, AiError> {
        reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(self.settings.timeout_secs))
            .build()
            .map_err(|e| AiError::Http(e.to_string()))
    }

    fn map_send_error(&self, e: reqwest::Error) -> AiError {
        if e.is_connect() {
            AiError::Connection(self.settings.base_url.clone())
        } else if e.is_timeout() {
            AiError::Http(format!(
                "Request timed out after {}s",
                self.settings.timeout_secs
            ))
        } else {
            AiError::Http(e.to_string())
        }
    }

    fn send_chat(&self, body: serde_json::Value) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.settings.base_url);
        let response = self
            .http()?
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::MalformedResponse("Empty choices array".into()))
    }
}

/// Response body from `/chat/completions`
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Response body from `/audio/transcriptions`
#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl CompletionClient for OpenAiClient {
    fn chat(&self, system: &str, user: &str) -> Result<String, AiError> {
        let body = json!({
            "model": self.settings.chat_model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.3,
            "max_tokens": 600,
        });
        self.send_chat(body)
    }

    fn chat_with_image(
        &self,
        system: &str,
        prompt: &str,
        mime_type: &str,
        image: &[u8],
    ) -> Result<String, AiError> {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let data_url = format!("data:{mime_type};base64,{encoded}");

        let body = json!({
            "model": self.settings.chat_model,
            "messages": [
                { "role": "system", "content": system },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": prompt },
                        { "type": "image_url", "image_url": { "url": data_url } },
                    ],
                },
            ],
            "max_tokens": 600,
        });
        self.send_chat(body)
    }

    fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String, AiError> {
        let url = format!("{}/audio/transcriptions", self.settings.base_url);
        let part = reqwest::blocking::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| AiError::Http(e.to_string()))?;
        let form = reqwest::blocking::multipart::Form::new()
            .text("model", self.settings.transcription_model.clone())
            .part("file", part);

        let response = self
            .http()?
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .multipart(form)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AiError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse = response
            .json()
            .map_err(|e| AiError::MalformedResponse(e.to_string()))?;
        Ok(parsed.text)
    }
}

/// Mock completion client for testing — returns configurable responses.
pub struct MockCompletionClient {
    response: String,
    transcription: String,
    failing: bool,
}

impl MockCompletionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            transcription: String::new(),
            failing: false,
        }
    }

    pub fn with_transcription(mut self, text: &str) -> Self {
        self.transcription = text.to_string();
        self
    }

    /// A client whose every call fails with a connection error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            transcription: String::new(),
            failing: true,
        }
    }

    fn result(&self, value: &str) -> Result<String, AiError> {
        if self.failing {
            Err(AiError::Connection("mock".into()))
        } else {
            Ok(value.to_string())
        }
    }
}

impl CompletionClient for MockCompletionClient {
    fn chat(&self, _system: &str, _user: &str) -> Result<String, AiError> {
        self.result(&self.response)
    }

    fn chat_with_image(
        &self,
        _system: &str,
        _prompt: &str,
        _mime_type: &str,
        _image: &[u8],
    ) -> Result<String, AiError> {
        self.result(&self.response)
    }

    fn transcribe(&self, _file_name: &str, _audio: Vec<u8>) -> Result<String, AiError> {
        self.result(&self.transcription)
    }
}
