//! Client configuration

use std::path::PathBuf;

use crate::http::NetworkHttpClient;
use crate::{ClientError, ClientResult};

/// Name of the persisted session file inside `session_dir`
pub const SESSION_FILE: &str = "session.json";

/// Client configuration for talking to the HR API
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HRIS_API_URL | http://localhost:8000/api | REST base URL |
/// | HRIS_STORAGE_URL | API origin + `/storage` | Base URL for stored photos and documents |
/// | HRIS_SESSION_DIR | `.hris` | Directory holding the session file |
/// | HRIS_TIMEOUT_SECS | unset (no timeout) | Per-request timeout |
/// | HRIS_LOG_LEVEL | info | Default log filter |
/// | HRIS_LOG_DIR | unset | Directory for daily-rolling log files |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST base URL (e.g. "http://localhost:8000/api")
    pub api_url: String,
    /// Storage base URL that server-relative media paths are joined onto
    pub storage_url: String,
    /// Directory holding the persisted session
    pub session_dir: PathBuf,
    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout: Option<u64>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let storage_url = default_storage_url(&api_url);
        Self {
            api_url,
            storage_url,
            session_dir: PathBuf::from(".hris"),
            timeout: None,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Load configuration from the environment (after `.env`, if present)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::new(
            std::env::var("HRIS_API_URL").unwrap_or_else(|_| "http://localhost:8000/api".into()),
        );
        if let Ok(storage_url) = std::env::var("HRIS_STORAGE_URL") {
            config = config.with_storage_url(storage_url);
        }
        if let Ok(dir) = std::env::var("HRIS_SESSION_DIR") {
            config.session_dir = PathBuf::from(dir);
        }
        config.timeout = std::env::var("HRIS_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .filter(|t| *t > 0);
        config.log_level = std::env::var("HRIS_LOG_LEVEL").unwrap_or_else(|_| "info".into());
        config.log_dir = std::env::var("HRIS_LOG_DIR").ok().filter(|d| !d.is_empty());
        config
    }

    /// Point at another API. A storage URL still on the old default follows
    /// the new origin.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let follows_api = self.storage_url == default_storage_url(&self.api_url);
        self.api_url = url.into().trim_end_matches('/').to_string();
        if follows_api {
            self.storage_url = default_storage_url(&self.api_url);
        }
        self
    }

    pub fn with_storage_url(mut self, url: impl Into<String>) -> Self {
        self.storage_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = dir.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<String>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Full path of the session file
    pub fn session_file(&self) -> PathBuf {
        self.session_dir.join(SESSION_FILE)
    }

    /// Absolute URL for a stored file.
    ///
    /// Blank paths yield `None`; paths that are already absolute URLs are
    /// returned unchanged.
    pub fn media_url(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        let path = path.trim_start_matches('/');
        let path = path.strip_prefix("storage/").unwrap_or(path);
        Some(format!("{}/{}", self.storage_url, path))
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "API URL must start with http:// or https://, got {:?}",
                self.api_url
            )));
        }
        NetworkHttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}

/// `http://host/api` → `http://host/storage`
fn default_storage_url(api_url: &str) -> String {
    let origin = api_url.strip_suffix("/api").unwrap_or(api_url);
    format!("{origin}/storage")
}
