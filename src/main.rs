use std::sync::Arc;

use carelink::ai::client::OpenAiClient;
use carelink::api::router::api_router;
use carelink::api::types::ApiContext;
use carelink::{config, db};

#[tokio::main]
async fn main() {
    carelink::init_tracing();
    tracing::info!("Carelink starting v{}", config::APP_VERSION);

    let data_dir = config::app_data_dir();
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::error!(dir = %data_dir.display(), error = %e, "Cannot create data directory");
        std::process::exit(1);
    }

    let db_path = config::database_path();
    // Open once at startup so migrations run (and fail) before we bind.
    match db::open_database(&db_path) {
        Ok(_) => tracing::info!(path = %db_path.display(), "Database ready"),
        Err(e) => {
            tracing::error!(error = %e, "Database initialization failed");
            std::process::exit(1);
        }
    }

    let ai_settings = config::AiSettings::from_env();
    if ai_settings.api_key.is_empty() {
        tracing::warn!("CARELINK_AI_KEY is not set; AI endpoints will return degraded responses");
    }
    let ai = Arc::new(OpenAiClient::new(ai_settings));

    let ctx = ApiContext::new(db_path, ai);
    let app = api_router(ctx);

    let addr = config::bind_address();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Cannot bind server address");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Server running");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
