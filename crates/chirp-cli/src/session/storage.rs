//! Token storage for persisting login state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chirp_core::{AuthToken, Result, StorageError, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored token data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    saved_at: DateTime<Utc>,
}

/// Keeps the session token in `token.json` under the user's data directory.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store in the platform data directory, creating it if needed.
    pub fn open() -> anyhow::Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "chirp").context("Could not determine data directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self::at(data_dir.join("token.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn storage_error(action: &str, path: &Path, e: impl std::fmt::Display) -> StorageError {
    StorageError::new(format!("failed to {action} {}: {e}", path.display()))
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AuthToken>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error("read", &self.path, e).into()),
        };
        let stored: StoredToken =
            serde_json::from_str(&json).map_err(|e| storage_error("parse", &self.path, e))?;
        debug!(saved_at = %stored.saved_at, "Loaded stored token");
        Ok(Some(AuthToken::new(stored.token)))
    }

    fn save(&self, token: &AuthToken) -> Result<()> {
        let stored = StoredToken {
            token: token.as_str().to_string(),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| storage_error("encode", &self.path, e))?;

        fs::write(&self.path, &json).map_err(|e| storage_error("write", &self.path, e))?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms)
                .map_err(|e| storage_error("protect", &self.path, e))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("remove", &self.path, e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("token.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("token.json"));
        store.save(&AuthToken::new("abc123")).unwrap();
        assert_eq!(store.load().unwrap(), Some(AuthToken::new("abc123")));

        store.save(&AuthToken::new("def456")).unwrap();
        assert_eq!(store.load().unwrap(), Some(AuthToken::new("def456")));
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("token.json"));
        store.save(&AuthToken::new("abc123")).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::at(dir.path().join("token.json"));
        store.save(&AuthToken::new("abc123")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();
        let err = FileTokenStore::at(path).load().unwrap_err();
        assert!(matches!(err, chirp_core::Error::Storage(_)));
    }
}
