//! Client configuration — base URL, probe deadline, and data directory.
//!
//! Values are resolved from environment variables with sensible fallbacks,
//! so a plain `ClientConfig::from_env()` works against a local backend.

use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Deadline for the backend availability probe.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, no trailing slash.
    pub base_url: String,
    /// Deadline for the availability probe; expiry is treated as "unavailable".
    pub health_timeout: Duration,
}

impl ClientConfig {
    /// Resolve configuration: `CINELOG_API_URL` → default local URL.
    pub fn from_env() -> Self {
        let base_url = match std::env::var("CINELOG_API_URL") {
            Ok(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => DEFAULT_BASE_URL.to_string(),
        };
        Self {
            base_url,
            health_timeout: HEALTH_PROBE_TIMEOUT,
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            health_timeout: HEALTH_PROBE_TIMEOUT,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Path to the persisted session record: `CINELOG_DATA_DIR` → user data dir.
pub fn session_path() -> PathBuf {
    data_dir().join("session.json")
}

fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CINELOG_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cinelog")
}
