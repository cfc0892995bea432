//! Persisted login session
//!
//! The identity and bearer token returned by login are written to a JSON
//! file and read back at startup. They are never refreshed in place: a new
//! login replaces the file, logout deletes it.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use shared::models::{Identity, Role};
use shared::response::LoginResponse;

use crate::config::SESSION_FILE;
use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Logged-in identity plus its token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
    /// Unix millis
    pub logged_in_at: i64,
}

impl Session {
    pub fn new(token: impl Into<String>, identity: Identity) -> Self {
        Self {
            token: token.into(),
            identity,
            logged_in_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }
}

impl From<LoginResponse> for Session {
    fn from(login: LoginResponse) -> Self {
        Self::new(login.token, login.user)
    }
}

/// Where the session lives between runs
pub trait SessionStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<Session>>;
    fn save(&self, session: &Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// JSON file store: `{dir}/session.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    file_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            file_path: dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        let session = serde_json::from_str(&content).map_err(|e| {
            ClientError::Session(format!("{}: {e}", self.file_path.display()))
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.file_path, content)?;
        tracing::debug!(path = %self.file_path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if self.file_path.exists() {
            std::fs::remove_file(&self.file_path)?;
        }
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        let guard = self
            .session
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".into()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}

/// Log in, persist the session and arm `http` with the token
pub async fn login<C: HttpClient>(
    http: &mut C,
    store: &dyn SessionStore,
    email: &str,
    password: &str,
) -> ClientResult<Arc<Session>> {
    let session = Session::from(http.login(email, password).await?);
    store.save(&session)?;
    http.set_token(Some(session.token.clone()));
    tracing::info!(
        user_id = %session.identity.id,
        role = %session.identity.role,
        "logged in"
    );
    Ok(Arc::new(session))
}

/// Stored session, or `Unauthorized` when there is none
pub fn restore(store: &dyn SessionStore) -> ClientResult<Arc<Session>> {
    store.load()?.map(Arc::new).ok_or(ClientError::Unauthorized)
}

/// Log out on the server and always drop the local session
pub async fn logout<C: HttpClient>(http: &mut C, store: &dyn SessionStore) -> ClientResult<()> {
    if let Err(e) = http.logout().await {
        tracing::warn!(error = %e, "server logout failed, clearing local session anyway");
    }
    http.set_token(None);
    store.clear()?;
    tracing::info!("logged out");
    Ok(())
}
