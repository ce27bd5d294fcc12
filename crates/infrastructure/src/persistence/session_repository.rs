//! File-backed session persistence.
//!
//! The hosted portal keeps two local-storage keys: the bearer token and
//! the serialized provider record. This adapter mirrors that layout as two
//! sibling files in the platform data directory:
//! - Linux/macOS: `~/.local/share/lovejoy-portal/` or
//!   `~/Library/Application Support/lovejoy-portal/`
//! - Windows: `%APPDATA%/lovejoy-portal/`
//!
//! The pair is written together and cleared together. A half-present pair
//! (a crash between writes, manual deletion) is reported as no session and
//! removed by the next save or clear.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use lovejoy_application::ports::{SessionRepository, StorageError};
use lovejoy_domain::{Provider, Session};

const TOKEN_FILE: &str = "doctor_token";
const PROFILE_FILE: &str = "doctor_profile.json";
const DATA_DIR: &str = "lovejoy-portal";

/// File-backed implementation of `SessionRepository`.
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    dir: PathBuf,
}

impl FileSessionRepository {
    /// Creates a repository rooted at an explicit directory.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Creates a repository in the platform data directory, or `None` when
    /// the platform reports no such directory.
    #[must_use]
    pub fn in_data_dir() -> Option<Self> {
        dirs::data_dir().map(|p| Self::new(p.join(DATA_DIR)))
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    async fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_if_present(path: &Path) -> Result<(), StorageError> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl SessionRepository for FileSessionRepository {
    async fn load(&self) -> Result<Option<Session>, StorageError> {
        let token = Self::read_if_present(&self.token_path()).await?;
        let profile = Self::read_if_present(&self.profile_path()).await?;

        let (Some(token), Some(profile)) = (token, profile) else {
            // Joint-presence invariant: one half alone is no session.
            debug!("incomplete persisted session, treating as signed out");
            return Ok(None);
        };

        let token = String::from_utf8(token)
            .map_err(|e| StorageError::Serialization(e.to_string()))?
            .trim()
            .to_string();
        let provider: Provider = serde_json::from_slice(&profile)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(Some(Session::new(token, provider)))
    }

    async fn save(&self, session: &Session) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;

        let profile = serde_json::to_vec_pretty(session.provider())
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        // Profile first: a crash between the writes leaves a profile
        // without a token, which load() reports as no session.
        fs::write(self.profile_path(), profile).await?;
        fs::write(self.token_path(), session.token().as_bytes()).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        Self::remove_if_present(&self.token_path()).await?;
        Self::remove_if_present(&self.profile_path()).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        let provider: Provider = serde_json::from_value(serde_json::json!({
            "id": 7,
            "first_name": "Amara",
            "last_name": "Okafor",
            "email": "a@b.com",
            "mobile": "1",
            "bio": "hello",
            "languages": ["English", "Spanish"],
            "wallet_balance": 830.25
        }))
        .unwrap();
        Session::new("T1", provider)
    }

    #[tokio::test]
    async fn round_trips_field_for_field() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        let session = sample_session();
        repo.save(&session).await.unwrap();
        let loaded = repo.load().await.unwrap().unwrap();

        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn empty_directory_is_no_session() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_both_files_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        repo.save(&sample_session()).await.unwrap();
        repo.clear().await.unwrap();

        assert!(repo.load().await.unwrap().is_none());
        assert!(!tmp.path().join(TOKEN_FILE).exists());
        assert!(!tmp.path().join(PROFILE_FILE).exists());

        // Clearing again is fine.
        repo.clear().await.unwrap();
    }

    #[tokio::test]
    async fn token_without_profile_is_no_session() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        std::fs::write(tmp.path().join(TOKEN_FILE), "orphan").unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_without_token_is_no_session() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        repo.save(&sample_session()).await.unwrap();
        std::fs::remove_file(tmp.path().join(TOKEN_FILE)).unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_repairs_a_half_present_pair() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        std::fs::write(tmp.path().join(TOKEN_FILE), "orphan").unwrap();
        repo.save(&sample_session()).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.token(), "T1");
    }

    #[tokio::test]
    async fn corrupt_profile_is_a_serialization_error() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        std::fs::write(tmp.path().join(TOKEN_FILE), "T1").unwrap();
        std::fs::write(tmp.path().join(PROFILE_FILE), "{not json").unwrap();

        let err = repo.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn token_whitespace_is_trimmed_on_load() {
        let tmp = TempDir::new().unwrap();
        let repo = FileSessionRepository::new(tmp.path().to_path_buf());

        repo.save(&sample_session()).await.unwrap();
        std::fs::write(tmp.path().join(TOKEN_FILE), "T1\n").unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.token(), "T1");
    }
}
