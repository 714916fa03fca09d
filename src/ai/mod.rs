//! External AI service integration.
//!
//! The completion/transcription service is an opaque collaborator
//! behind the [`CompletionClient`] trait. Analyses that promise a JSON
//! shape to the caller substitute a well-formed placeholder payload
//! when the service fails or returns something unparseable — callers
//! in a clinical context must never see a raw parse error.

pub mod analysis;
pub mod client;

pub use analysis::*;
pub use client::{CompletionClient, MockCompletionClient, OpenAiClient};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("Cannot reach AI service at {0}")]
    Connection(String),

    #[error("AI request failed: {0}")]
    Http(String),

    #[error("AI service returned status {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),
}
