//! Consultation transcript processing.
//!
//! A consultation is dictated in chunks: each stop-recording event
//! yields one transcribed chunk, and each chunk is merged into the
//! session's draft. The draft is passed into and returned from every
//! call — the extractor itself only holds compiled patterns.

mod extractor;
mod types;

pub use extractor::TranscriptExtractor;
pub use types::ExtractedConsultation;
