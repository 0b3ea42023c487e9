//! Question oracle implementing [`battle_core::QuestionOracle`].

use battle_core::{OracleError, QuestionCard, QuestionOracle, QuestionRequest};

/// In-memory question bank.
///
/// A draw considers cards of the requested difficulty whose `min_level` does
/// not exceed the player level, skips the excluded card when another one
/// qualifies, and picks by `seed` modulo the candidate count.
#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    cards: Vec<QuestionCard>,
}

impl QuestionBank {
    pub fn new(cards: Vec<QuestionCard>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl QuestionOracle for QuestionBank {
    fn draw(&self, request: &QuestionRequest, seed: u64) -> Result<QuestionCard, OracleError> {
        if self.cards.is_empty() {
            return Err(OracleError::QuestionsNotAvailable);
        }

        let eligible: Vec<&QuestionCard> = self
            .cards
            .iter()
            .filter(|card| card.difficulty == request.difficulty && card.min_level <= request.level)
            .collect();

        let fresh: Vec<&QuestionCard> = eligible
            .iter()
            .copied()
            .filter(|card| Some(card.id) != request.exclude)
            .collect();
        let candidates = if fresh.is_empty() { eligible } else { fresh };

        if candidates.is_empty() {
            return Err(OracleError::NoQuestionFor {
                difficulty: request.difficulty,
                level: request.level,
            });
        }

        let index = (seed % candidates.len() as u64) as usize;
        Ok(candidates[index].clone())
    }
}
