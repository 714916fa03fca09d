//! Shared state for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::ai::client::CompletionClient;
use crate::consultation::TranscriptExtractor;
use crate::db::{self, DatabaseError};

/// Shared context for all API routes: the database location, the AI
/// service client, and the compiled transcript extractor.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
    pub ai: Arc<dyn CompletionClient>,
    pub extractor: Arc<TranscriptExtractor>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, ai: Arc<dyn CompletionClient>) -> Self {
        Self {
            db_path: Arc::new(db_path),
            ai,
            extractor: Arc::new(TranscriptExtractor::new()),
        }
    }

    /// Open a connection for the current request. Migrations already
    /// ran at startup, so this is an open + version check.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }
}
