//! Owned session context: the authenticated user plus their token pair.
//!
//! The session is an explicit value created by login, persisted under the
//! state directory, rehydrated at startup and passed into whatever needs it
//! (API client, app). Nothing here is process-global, so tests inject a
//! fabricated session directly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::types::{TokenPair, User};

const SESSION_FILE: &str = "session.toml";

/// A logged-in account and its tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub tokens: TokenPair,
}

impl Session {
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self { user, tokens }
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access
    }

    /// Load the persisted session, if any. A missing file is `None`;
    /// a corrupt file is an error so the user learns about it.
    pub fn load(state_dir: &Path) -> Result<Option<Session>> {
        let path = Self::file_path(state_dir);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        let session = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse session file {}", path.display()))?;
        debug!(path = %path.display(), "session rehydrated");
        Ok(Some(session))
    }

    /// Persist the session for the next run.
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(state_dir).with_context(|| {
            format!("Failed to create state directory {}", state_dir.display())
        })?;
        let path = Self::file_path(state_dir);
        let raw = toml::to_string_pretty(self).context("Failed to serialize session")?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write session file {}", path.display()))?;
        Ok(())
    }

    /// Drop the persisted session (logout).
    pub fn clear(state_dir: &Path) -> Result<()> {
        let path = Self::file_path(state_dir);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove session file {}", path.display()))?;
        }
        Ok(())
    }

    fn file_path(state_dir: &Path) -> PathBuf {
        state_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserRole;
    use tempfile::TempDir;

    pub(crate) fn fake_session() -> Session {
        let user: User = serde_json::from_value(serde_json::json!({
            "userid": 5,
            "user_firstname": "Nia",
            "user_lastname": "Kato",
            "full_name": "Nia Kato",
            "email": "nia@example.com",
            "user_role": "buyer",
            "date_joined": "2025-02-10T08:30:00Z"
        }))
        .unwrap();
        Session::new(
            user,
            TokenPair {
                access: "access-token".into(),
                refresh: "refresh-token".into(),
            },
        )
    }

    #[test]
    fn save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let session = fake_session();
        session.save(dir.path()).unwrap();

        let loaded = Session::load(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.user.user_id, 5);
        assert_eq!(loaded.user.user_role, UserRole::Buyer);
        assert_eq!(loaded.access_token(), "access-token");
    }

    #[test]
    fn load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(Session::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn clear_removes_file_and_tolerates_absence() {
        let dir = TempDir::new().unwrap();
        fake_session().save(dir.path()).unwrap();
        Session::clear(dir.path()).unwrap();
        assert!(Session::load(dir.path()).unwrap().is_none());
        // Second clear is fine
        Session::clear(dir.path()).unwrap();
    }

    #[test]
    fn corrupt_session_is_an_error_not_silence() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not = [valid").unwrap();
        assert!(Session::load(dir.path()).is_err());
    }
}
