//! Session store — the client-held authenticated identity and credential.
//!
//! The session is one serialized record (identity + token together) persisted
//! at a fixed path under the per-user data directory. Lifecycle:
//! `load → authenticated ⇄ anonymous`, with an unconditional clear on logout
//! and on any 401 from the backend.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::config;
use crate::models::auth::Session;

/// Session persistence errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Holds the current session and mirrors it to durable storage.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    current: Option<Session>,
}

impl SessionStore {
    /// Store backed by the default per-user session file.
    pub fn open() -> Self {
        Self::at(config::session_path())
    }

    /// Store backed by an explicit path, loading any persisted record.
    ///
    /// A corrupt record is treated as anonymous and removed rather than
    /// failing the caller.
    pub fn at(path: PathBuf) -> Self {
        let current = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding corrupt session record");
                    let _ = std::fs::remove_file(&path);
                    None
                }
            },
            Err(_) => None,
        };
        Self { path, current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(|s| s.user.is_admin())
    }

    /// Store and persist a freshly authenticated session.
    pub fn set(&mut self, session: Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, raw)?;
        info!(username = %session.user.username, "session persisted");
        self.current = Some(session);
        Ok(())
    }

    /// Clear identity and credential unconditionally. Safe to call when
    /// already anonymous; persistence failures do not keep the session alive.
    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            info!("session cleared");
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "could not remove session file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{Role, User};

    fn session(role: Role) -> Session {
        Session {
            user: User {
                id: 1,
                username: "alice".into(),
                role,
            },
            token: "tok-123".into(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::at(dir.path().join("session.json"))
    }

    #[test]
    fn starts_anonymous_without_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn set_persists_and_reload_restores() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set(session(Role::User)).unwrap();

        let reloaded = store_in(&dir);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token(), Some("tok-123"));
        assert_eq!(reloaded.current().unwrap().user.username, "alice");
    }

    #[test]
    fn clear_removes_identity_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set(session(Role::Admin)).unwrap();
        store.clear();

        assert!(!store.is_authenticated());
        let reloaded = store_in(&dir);
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn clear_when_anonymous_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn corrupt_record_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::at(path.clone());
        assert!(!store.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn admin_accessor_reflects_role() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.set(session(Role::User)).unwrap();
        assert!(!store.is_admin());
        store.set(session(Role::Admin)).unwrap();
        assert!(store.is_admin());
    }
}
