//! Error types raised by repository implementations.

use battle_core::CharacterId;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("{0} is not stored in the repository")]
    CharacterMissing(CharacterId),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
