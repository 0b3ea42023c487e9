//! Common error infrastructure for battle-core.
//!
//! Every rejected action surfaces a [`BattleError`]. Validation runs before any
//! field of the session is touched, so an error always means "nothing changed".

use crate::env::OracleError;
use crate::state::{BattlePhase, QuestionId};

/// Severity level of an error, used for categorization and status mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input or an action attempted in the wrong state.
    ///
    /// Examples: wrong turn owner, stunned, insufficient energy
    Validation,

    /// A referenced entity does not exist.
    ///
    /// Examples: no active session, unknown question or monster
    NotFound,

    /// Unexpected failure of a collaborator or an inconsistent state.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error indicates a bug or collaborator failure.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all battle errors.
///
/// Provides a uniform interface for error classification across crates.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by the turn sequencer when an action is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("action requires phase {expected}, battle is in {actual}")]
    WrongPhase {
        expected: BattlePhase,
        actual: BattlePhase,
    },

    #[error("player is stunned and can only skip the turn")]
    Stunned,

    #[error("player is not stunned")]
    NotStunned,

    #[error("insufficient energy: requires {required}, available {available}")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("skills are disabled this turn")]
    SkillDisabled,

    #[error("battle has already finished")]
    BattleFinished,

    #[error("answer targets question {provided}, current question is {expected}")]
    QuestionMismatch {
        expected: QuestionId,
        provided: QuestionId,
    },

    #[error("no incorrect option left to reveal")]
    NothingToReveal,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::QuestionMismatch { .. } => ErrorSeverity::NotFound,
            Self::Oracle(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongPhase { .. } => "BATTLE_WRONG_PHASE",
            Self::Stunned => "BATTLE_STUNNED",
            Self::NotStunned => "BATTLE_NOT_STUNNED",
            Self::InsufficientEnergy { .. } => "BATTLE_INSUFFICIENT_ENERGY",
            Self::SkillDisabled => "BATTLE_SKILL_DISABLED",
            Self::BattleFinished => "BATTLE_FINISHED",
            Self::QuestionMismatch { .. } => "BATTLE_QUESTION_MISMATCH",
            Self::NothingToReveal => "BATTLE_NOTHING_TO_REVEAL",
            Self::Oracle(err) => err.error_code(),
        }
    }
}
