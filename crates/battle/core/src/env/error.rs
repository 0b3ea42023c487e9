//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Difficulty;

/// Errors raised when an oracle cannot provide the requested data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The question bank is empty or unreachable.
    #[error("question bank not available")]
    QuestionsNotAvailable,

    /// No question matches the requested difficulty and level.
    #[error("no {difficulty} question available for level {level}")]
    NoQuestionFor { difficulty: Difficulty, level: u32 },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::QuestionsNotAvailable => ErrorSeverity::Internal,
            Self::NoQuestionFor { .. } => ErrorSeverity::NotFound,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::QuestionsNotAvailable => "ORACLE_QUESTIONS_NOT_AVAILABLE",
            Self::NoQuestionFor { .. } => "ORACLE_NO_QUESTION_FOR",
        }
    }
}
