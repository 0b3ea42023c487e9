use super::OracleError;
use crate::state::{Difficulty, QuestionCard, QuestionId};

/// Parameters of a question draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestionRequest {
    pub difficulty: Difficulty,
    /// Player level; only cards with `min_level <= level` qualify.
    pub level: u32,
    /// Question to avoid repeating when an alternative exists.
    pub exclude: Option<QuestionId>,
}

/// Source of random questions. The engine only ever asks for "a question of
/// difficulty D for level L"; selection rules belong to the implementation.
pub trait QuestionOracle: Send + Sync {
    fn draw(&self, request: &QuestionRequest, seed: u64) -> Result<QuestionCard, OracleError>;
}
