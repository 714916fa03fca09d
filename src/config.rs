use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Carelink";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "carelink=info,tower_http=warn"
}

/// Get the application data directory
/// ~/Carelink/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Path of the SQLite database file.
pub fn database_path() -> PathBuf {
    app_data_dir().join("carelink.db")
}

/// Address the HTTP server binds to. `CARELINK_ADDR` overrides the
/// default of 127.0.0.1:5000.
pub fn bind_address() -> SocketAddr {
    std::env::var("CARELINK_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5000)))
}

/// Settings for the external OpenAI-compatible AI service.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub transcription_model: String,
    pub timeout_secs: u64,
}

impl AiSettings {
    /// Read settings from the environment. Only the API key has no
    /// default; an empty key means every AI call fails upstream and
    /// surfaces through the normal degraded-response path.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("CARELINK_AI_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("CARELINK_AI_KEY").unwrap_or_default(),
            chat_model: std::env::var("CARELINK_AI_MODEL")
                .unwrap_or_else(|_| "gpt-4o".to_string()),
            transcription_model: std::env::var("CARELINK_AI_TRANSCRIPTION_MODEL")
                .unwrap_or_else(|_| "whisper-1".to_string()),
            timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Carelink"));
    }

    #[test]
    fn database_path_under_app_data() {
        let db = database_path();
        assert!(db.starts_with(app_data_dir()));
    }

    #[test]
    fn bind_address_defaults_to_localhost_5000() {
        // Only valid when the override is unset in the test environment
        if std::env::var("CARELINK_ADDR").is_err() {
            assert_eq!(bind_address(), SocketAddr::from(([127, 0, 0, 1], 5000)));
        }
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
