pub mod api; // HTTP API router + endpoints
pub mod config;
pub mod models;
pub mod db;
pub mod care_circle; // caregiver <-> patient access grants
pub mod consultation; // transcript field extraction
pub mod ai; // external completion / transcription service

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from `RUST_LOG`, falling back to
/// the default filter from `config`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
