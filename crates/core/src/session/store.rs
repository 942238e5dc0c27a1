//! Durable session store
//!
//! Persists the single active session under one well-known file so it
//! survives a process restart. One session at a time: login replaces any
//! prior record, logout removes it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::Error;
use crate::Result;

use super::model::Session;

/// File name of the single persisted session record
const SESSION_FILE: &str = "session.json";

/// Thread-safe single-slot session store with file persistence
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    file_path: PathBuf,
}

impl SessionStore {
    /// Open the store rooted at `base_dir`, restoring any persisted session.
    ///
    /// A missing, empty, or corrupt record degrades to "no session".
    pub async fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        tokio::fs::create_dir_all(&base_dir).await.map_err(|e| {
            Error::Storage(format!("Failed to create session directory: {}", e))
        })?;

        let file_path = base_dir.join(SESSION_FILE);
        let current = load_session(&file_path).await;

        Ok(Self {
            current: Arc::new(RwLock::new(current)),
            file_path,
        })
    }

    /// Replace any prior session with `session` and persist it
    pub async fn login(&self, session: Session) -> Result<()> {
        let content = serde_json::to_string_pretty(&session)?;
        tokio::fs::write(&self.file_path, content)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write session file: {}", e)))?;

        info!(user = %session.username, role = %session.role, "Session established");
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Clear the current session and its persisted copy
    pub async fn logout(&self) -> Result<()> {
        *self.current.write().await = None;
        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to remove session file: {}",
                    e
                )))
            }
        }
        info!("Session cleared");
        Ok(())
    }

    /// The current session, or `None` when logged out
    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }
}

async fn load_session(path: &Path) -> Option<Session> {
    if !path.exists() {
        return None;
    }
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read session file, treating as logged out: {}", e);
            return None;
        }
    };
    if content.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(&content) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("Corrupt session record, treating as logged out: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::session::Role;

    fn session(username: &str, role: Role) -> Session {
        Session {
            id: 1,
            username: username.to_string(),
            name: None,
            email: None,
            role,
            token: "tok-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_session_survives_reopen() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).await.unwrap();
        store.login(session("alice", Role::Donor)).await.unwrap();

        let reopened = SessionStore::open(dir.path()).await.unwrap();
        let current = reopened.current().await.unwrap();
        assert_eq!(current.username, "alice");
        assert_eq!(current.role, Role::Donor);
    }

    #[tokio::test]
    async fn test_login_replaces_prior_session() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).await.unwrap();
        store.login(session("alice", Role::Donor)).await.unwrap();
        store.login(session("bob", Role::Beneficiary)).await.unwrap();

        let current = store.current().await.unwrap();
        assert_eq!(current.username, "bob");
        assert_eq!(current.role, Role::Beneficiary);
    }

    #[tokio::test]
    async fn test_logout_clears_memory_and_disk() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).await.unwrap();
        store.login(session("alice", Role::Donor)).await.unwrap();

        store.logout().await.unwrap();
        assert!(store.current().await.is_none());

        let reopened = SessionStore::open(dir.path()).await.unwrap();
        assert!(reopened.current().await.is_none());
    }

    #[tokio::test]
    async fn test_logout_without_session_is_fine() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).await.unwrap();
        store.logout().await.unwrap();
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_record_degrades_to_logged_out() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join(SESSION_FILE), "{not json")
            .await
            .unwrap();

        let store = SessionStore::open(dir.path()).await.unwrap();
        assert!(store.current().await.is_none());
    }
}
