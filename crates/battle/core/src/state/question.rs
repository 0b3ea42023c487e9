//! Questions as stored in the bank and as held by a running battle.

use super::QuestionId;
use crate::env::{RngOracle, compute_seed};

/// Difficulty tag shared by sessions and question cards.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// A question bank entry, answer included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionCard {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    /// Text of the correct option.
    pub answer: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hint: Option<String>,
    pub difficulty: Difficulty,
    #[cfg_attr(feature = "serde", serde(default = "default_min_level"))]
    pub min_level: u32,
}

#[cfg(feature = "serde")]
fn default_min_level() -> u32 {
    1
}

/// The question currently in front of the player.
///
/// `answer_key` never leaves the core: snapshots project this into a
/// [`crate::QuestionView`] without it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub min_level: u32,
    pub difficulty: Difficulty,
    pub hint: Option<String>,
    answer_key: String,
    /// Answers submitted after this instant count as incorrect.
    pub deadline_ms: Option<u64>,
    /// Hint revealed by an insight skill for this question.
    pub revealed_hint: Option<String>,
}

impl ActiveQuestion {
    pub fn from_card(card: QuestionCard) -> Self {
        Self {
            id: card.id,
            prompt: card.prompt,
            options: card.options,
            min_level: card.min_level,
            difficulty: card.difficulty,
            hint: card.hint,
            answer_key: card.answer,
            deadline_ms: None,
            revealed_hint: None,
        }
    }

    /// Case- and whitespace-insensitive comparison against the answer key.
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case(self.answer_key.trim())
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|deadline| now_ms > deadline)
    }

    /// Indices of options that are not the answer.
    pub fn incorrect_options(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, option)| !self.accepts(option))
            .map(|(index, _)| index)
            .collect()
    }

    /// Removes one incorrect option picked from `seed`. Returns the removed
    /// text, or `None` if only correct options remain.
    pub fn reveal_incorrect(&mut self, rng: &dyn RngOracle, seed: u64) -> Option<String> {
        let candidates = self.incorrect_options();
        if candidates.is_empty() {
            return None;
        }
        let pick = rng.next_u32(seed) as usize % candidates.len();
        Some(self.options.remove(candidates[pick]))
    }

    /// Stored hint, or a first-letter hint when the card has none.
    pub fn insight(&self) -> String {
        if let Some(hint) = self.hint.as_deref().filter(|h| !h.trim().is_empty()) {
            return hint.to_string();
        }
        match self.answer_key.trim().chars().next() {
            Some(letter) => format!("The answer starts with the letter '{}'.", letter.to_uppercase()),
            None => "No hint is available for this question.".to_string(),
        }
    }

    /// Shuffles the prompt's words in place (Fisher-Yates driven by `seed`).
    pub fn scramble(&mut self, rng: &dyn RngOracle, seed: u64) {
        let mut words: Vec<&str> = self.prompt.split_whitespace().collect();
        for i in (1..words.len()).rev() {
            let j = rng.next_u32(compute_seed(seed, i as u64, 0, 0)) as usize % (i + 1);
            words.swap(i, j);
        }
        self.prompt = words.join(" ");
    }
}
