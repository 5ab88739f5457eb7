//! File-backed token repository.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::auth::TokenPair;
use crate::error::{InvalidInputError, PersistenceError};

use super::TokenRepository;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk layout of the token file.
#[derive(Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    #[serde(default)]
    refresh_token: String,
}

/// Token repository persisting the pair as a single JSON file.
///
/// Writes go to a temporary sibling and are renamed into place, so readers
/// observe either the previous pair or the new one. An advisory lock file
/// serializes writers across processes sharing the same path.
#[derive(Debug)]
pub struct FileTokenRepository {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileTokenRepository {
    /// Create a repository storing tokens at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            guard: Mutex::new(()),
        }
    }

    /// Path of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    fn ensure_parent(&self) -> std::result::Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
        }
        Ok(())
    }

    fn with_file_lock<T>(
        &self,
        f: impl FnOnce() -> std::result::Result<T, PersistenceError>,
    ) -> std::result::Result<T, PersistenceError> {
        self.ensure_parent()?;

        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| PersistenceError::io(&lock_path, e))?;

        lock_file
            .lock_exclusive()
            .map_err(|e| PersistenceError::io(&lock_path, e))?;
        let result = f();
        lock_file
            .unlock()
            .map_err(|e| PersistenceError::io(&lock_path, e))?;

        result
    }

    fn read(&self) -> std::result::Result<TokenPair, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(PersistenceError::NotFound),
            Err(err) => return Err(PersistenceError::io(&self.path, err)),
        };

        let stored: StoredTokens =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        if stored.access_token.is_empty() {
            return Err(PersistenceError::NotFound);
        }

        Ok(TokenPair::new(stored.access_token, stored.refresh_token))
    }

    fn write(&self, access: &str, refresh: &str) -> std::result::Result<(), PersistenceError> {
        let stored = StoredTokens {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(|e| PersistenceError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| PersistenceError::io(&temp_path, e))?;

        // Set restrictive permissions before any secret is written (Unix only)
        #[cfg(unix)]
        fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))
            .map_err(|e| PersistenceError::io(&temp_path, e))?;

        file.write_all(json.as_bytes())
            .and_then(|_| file.sync_data())
            .map_err(|e| PersistenceError::io(&temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| PersistenceError::io(&self.path, e))
    }

    fn remove(&self) -> std::result::Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistenceError::io(&self.path, err)),
        }
    }
}

#[async_trait]
impl TokenRepository for FileTokenRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get_tokens(&self) -> Result<TokenPair> {
        let _guard = self.guard.lock().await;
        Ok(self.read()?)
    }

    #[instrument(skip(self, access, refresh), fields(path = %self.path.display()))]
    async fn save_tokens(&self, access: &str, refresh: &str) -> Result<()> {
        if access.is_empty() {
            return Err(InvalidInputError::EmptyAccessToken.into());
        }

        let _guard = self.guard.lock().await;
        self.with_file_lock(|| self.write(access, refresh))?;

        info!("Tokens saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn delete_tokens(&self) -> Result<()> {
        let _guard = self.guard.lock().await;
        self.with_file_lock(|| self.remove())?;

        debug!("Tokens deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn temp_repo() -> (TempDir, FileTokenRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FileTokenRepository::new(dir.path().join("nested").join("tokens.json"));
        (dir, repo)
    }

    #[tokio::test]
    async fn save_then_get_returns_equal_pair() {
        let (_dir, repo) = temp_repo();
        repo.save_tokens("access", "refresh").await.unwrap();
        assert_eq!(
            repo.get_tokens().await.unwrap(),
            TokenPair::new("access", "refresh")
        );
    }

    #[tokio::test]
    async fn save_replaces_previous_pair() {
        let (_dir, repo) = temp_repo();
        repo.save_tokens("a1", "r1").await.unwrap();
        repo.save_tokens("a2", "r2").await.unwrap();
        assert_eq!(repo.get_tokens().await.unwrap(), TokenPair::new("a2", "r2"));
        assert!(!repo.temp_path().exists());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let (_dir, repo) = temp_repo();
        assert!(matches!(
            repo.get_tokens().await,
            Err(Error::Persistence(PersistenceError::NotFound))
        ));
    }

    #[tokio::test]
    async fn delete_removes_file_and_is_idempotent() {
        let (_dir, repo) = temp_repo();
        repo.save_tokens("access", "refresh").await.unwrap();
        repo.delete_tokens().await.unwrap();
        assert!(!repo.path().exists());
        repo.delete_tokens().await.unwrap();
        assert!(matches!(
            repo.get_tokens().await,
            Err(Error::Persistence(PersistenceError::NotFound))
        ));
    }

    #[tokio::test]
    async fn empty_refresh_token_is_allowed() {
        let (_dir, repo) = temp_repo();
        repo.save_tokens("access", "").await.unwrap();
        let pair = repo.get_tokens().await.unwrap();
        assert!(pair.refresh_token().is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_access_token() {
        let (_dir, repo) = temp_repo();
        let err = repo.save_tokens("", "refresh").await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::EmptyAccessToken)
        ));
        assert!(!repo.path().exists());
    }

    #[tokio::test]
    async fn garbage_file_is_corrupt() {
        let (_dir, repo) = temp_repo();
        fs::create_dir_all(repo.path().parent().unwrap()).unwrap();
        fs::write(repo.path(), "not json").unwrap();
        assert!(matches!(
            repo.get_tokens().await,
            Err(Error::Persistence(PersistenceError::Corrupt { .. }))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_never_expose_a_torn_pair() {
        let (_dir, repo) = temp_repo();
        repo.save_tokens("a0", "r0").await.unwrap();
        let repo = Arc::new(repo);
        // A second handle on the same file shares no in-process lock.
        let other = Arc::new(FileTokenRepository::new(repo.path()));

        let writers = (0..4).map(|w| {
            let repo = repo.clone();
            tokio::spawn(async move {
                for i in 0..25 {
                    let n = w * 100 + i;
                    repo.save_tokens(&format!("a{n}"), &format!("r{n}"))
                        .await
                        .unwrap();
                }
            })
        });
        let readers = [repo.clone(), other.clone(), repo.clone(), other]
            .into_iter()
            .map(|reader| {
                tokio::spawn(async move {
                    for _ in 0..100 {
                        let pair = reader.get_tokens().await.unwrap();
                        let access = pair.access_token().as_str();
                        let refresh = pair.refresh_token().as_str();
                        assert_eq!(access.strip_prefix('a'), refresh.strip_prefix('r'));
                    }
                })
            });

        let handles: Vec<_> = writers.chain(readers).collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let last = repo.get_tokens().await.unwrap();
        assert_eq!(
            last.access_token().as_str().strip_prefix('a'),
            last.refresh_token().as_str().strip_prefix('r')
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn token_file_is_private() {
        let (_dir, repo) = temp_repo();
        repo.save_tokens("access", "refresh").await.unwrap();
        let mode = fs::metadata(repo.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
