//! Unified error type surfaced by the battle service.
//!
//! Wraps rule rejections from `battle-core`, repository failures, and
//! collaborator failures so callers can map every failure to a status through
//! [`GameError::severity`].

use battle_core::{BattleError, CharacterId, ErrorSeverity, GameError, MonsterId, UserId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{user} has no active battle")]
    NoActiveBattle { user: UserId },

    #[error("{0} not found")]
    MonsterNotFound(MonsterId),

    #[error("{0} not found")]
    CharacterNotFound(CharacterId),

    #[error("unknown action '{0}'")]
    InvalidAction(String),

    #[error("hook '{name}' failed: {message}")]
    Hook { name: &'static str, message: String },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Battle(err) => err.severity(),
            Self::Repository(_) | Self::Hook { .. } => ErrorSeverity::Internal,
            Self::NoActiveBattle { .. } | Self::MonsterNotFound(_) | Self::CharacterNotFound(_) => {
                ErrorSeverity::NotFound
            }
            Self::InvalidAction(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Battle(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::NoActiveBattle { .. } => "RUNTIME_NO_ACTIVE_BATTLE",
            Self::MonsterNotFound(_) => "RUNTIME_MONSTER_NOT_FOUND",
            Self::CharacterNotFound(_) => "RUNTIME_CHARACTER_NOT_FOUND",
            Self::InvalidAction(_) => "RUNTIME_INVALID_ACTION",
            Self::Hook { .. } => "RUNTIME_HOOK_FAILED",
        }
    }
}
