//! Token persistence.
//!
//! The authenticated engine only talks to storage through [`TokenRepository`].
//! Two implementations ship with the crate: [`MemoryTokenRepository`] for
//! tests and embedders, and [`FileTokenRepository`] for the CLI.

mod file;
mod memory;

use async_trait::async_trait;

use crate::Result;
use crate::auth::TokenPair;

pub use file::FileTokenRepository;
pub use memory::MemoryTokenRepository;

/// Durable storage for exactly one token pair.
///
/// Implementations must be linearizable: a `save_tokens` racing with a
/// `get_tokens` yields either the old pair or the new pair, never a mix.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the stored pair, or [`PersistenceError::NotFound`] when none
    /// was saved or it was deleted.
    ///
    /// [`PersistenceError::NotFound`]: crate::error::PersistenceError::NotFound
    async fn get_tokens(&self) -> Result<TokenPair>;

    /// Replaces the stored pair. `refresh` may be empty; `access` may not.
    async fn save_tokens(&self, access: &str, refresh: &str) -> Result<()>;

    /// Removes the stored pair. Deleting an absent pair is not an error.
    async fn delete_tokens(&self) -> Result<()>;
}
