//! In-memory token repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Result;
use crate::auth::TokenPair;
use crate::error::{InvalidInputError, PersistenceError};

use super::TokenRepository;

/// Token repository that keeps the pair in process memory.
#[derive(Debug, Default)]
pub struct MemoryTokenRepository {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository that already holds a pair.
    pub fn with_tokens(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            tokens: RwLock::new(Some(TokenPair::new(access, refresh))),
        }
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn get_tokens(&self) -> Result<TokenPair> {
        self.tokens
            .read()
            .await
            .clone()
            .ok_or_else(|| PersistenceError::NotFound.into())
    }

    async fn save_tokens(&self, access: &str, refresh: &str) -> Result<()> {
        if access.is_empty() {
            return Err(InvalidInputError::EmptyAccessToken.into());
        }
        *self.tokens.write().await = Some(TokenPair::new(access, refresh));
        Ok(())
    }

    async fn delete_tokens(&self) -> Result<()> {
        *self.tokens.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn save_then_get_returns_equal_pair() {
        let repo = MemoryTokenRepository::new();
        repo.save_tokens("access", "refresh").await.unwrap();
        assert_eq!(
            repo.get_tokens().await.unwrap(),
            TokenPair::new("access", "refresh")
        );
    }

    #[tokio::test]
    async fn get_after_delete_is_not_found() {
        let repo = MemoryTokenRepository::with_tokens("access", "refresh");
        repo.delete_tokens().await.unwrap();
        assert!(matches!(
            repo.get_tokens().await,
            Err(Error::Persistence(PersistenceError::NotFound))
        ));
        // Deleting twice is fine.
        repo.delete_tokens().await.unwrap();
    }

    #[tokio::test]
    async fn rejects_empty_access_token() {
        let repo = MemoryTokenRepository::new();
        assert!(repo.save_tokens("", "refresh").await.is_err());
        assert!(repo.get_tokens().await.is_err());
    }
}
