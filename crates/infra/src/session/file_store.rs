//! File-backed session persistence
//!
//! Stores the bearer token and the serialized user as two entries in one
//! directory: `access_token` (raw string) and `user.json`. Writes go through
//! a temp file plus rename so a crash never leaves a half-written entry, and
//! both entries are removed together on clear.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use coreshift_core::SessionPersistence;
use coreshift_domain::{CoreShiftError, Result, Session, User};
use tracing::debug;

const TOKEN_FILE: &str = "access_token";
const USER_FILE: &str = "user.json";

/// Session persistence backed by a directory on disk.
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    /// Use `dir` as the storage directory. It is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, contents).await.map_err(|err| storage_error(&tmp, err))?;
        tokio::fs::rename(&tmp, path).await.map_err(|err| storage_error(path, err))
    }

    async fn remove_if_present(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_error(path, err)),
        }
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> CoreShiftError {
    CoreShiftError::internal(format!("session storage {}: {err}", path.display()))
}

#[async_trait]
impl SessionPersistence for FileSessionStorage {
    async fn load(&self) -> Result<Option<Session>> {
        let token = match tokio::fs::read_to_string(self.token_path()).await {
            Ok(token) => token,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_error(&self.token_path(), err)),
        };

        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(CoreShiftError::internal("session storage: empty token entry"));
        }

        let user_json = tokio::fs::read_to_string(self.user_path())
            .await
            .map_err(|err| storage_error(&self.user_path(), err))?;
        let user: User = serde_json::from_str(&user_json).map_err(|err| {
            CoreShiftError::internal(format!("session storage: corrupt user entry: {err}"))
        })?;

        Ok(Some(Session::new(token, user)))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| storage_error(&self.dir, err))?;

        let user_json = serde_json::to_vec(&session.user).map_err(|err| {
            CoreShiftError::internal(format!("failed to serialize user: {err}"))
        })?;

        Self::write_atomic(&self.token_path(), session.token.as_bytes()).await?;
        Self::write_atomic(&self.user_path(), &user_json).await?;
        debug!(dir = %self.dir.display(), "session persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        Self::remove_if_present(&self.token_path()).await?;
        Self::remove_if_present(&self.user_path()).await?;
        debug!(dir = %self.dir.display(), "session storage cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn storage() -> (TempDir, FileSessionStorage) {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStorage::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn load_is_none_when_nothing_stored() {
        let (_dir, store) = storage();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (_dir, store) = storage();
        let session = Session::new("tok-abc", User::named("Asha"));

        store.save(&session).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();

        assert_eq!(loaded.token, "tok-abc");
        assert_eq!(loaded.user.name, "Asha");
    }

    #[tokio::test]
    async fn save_overwrites_previous_session() {
        let (_dir, store) = storage();
        store.save(&Session::new("old", User::named("Asha"))).await.unwrap();
        store.save(&Session::new("new", User::named("Ravi"))).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.token, "new");
        assert_eq!(loaded.user.name, "Ravi");
    }

    #[tokio::test]
    async fn clear_removes_both_entries_and_is_idempotent() {
        let (dir, store) = storage();
        store.save(&Session::new("tok", User::named("Asha"))).await.unwrap();

        store.clear().await.unwrap();
        assert!(!dir.path().join(TOKEN_FILE).exists());
        assert!(!dir.path().join(USER_FILE).exists());
        assert!(store.load().await.unwrap().is_none());

        // Clearing empty storage must not fail.
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_user_entry_is_an_error() {
        let (dir, store) = storage();
        store.save(&Session::new("tok", User::named("Asha"))).await.unwrap();
        std::fs::write(dir.path().join(USER_FILE), "{not json").unwrap();

        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn token_without_user_entry_is_an_error() {
        let (dir, store) = storage();
        store.save(&Session::new("tok", User::named("Asha"))).await.unwrap();
        std::fs::remove_file(dir.path().join(USER_FILE)).unwrap();

        assert!(store.load().await.is_err());
    }
}
