//! Question bank loader.

use std::collections::HashSet;
use std::path::Path;

use battle_core::QuestionCard;

use crate::loaders::{LoadResult, read_file};

/// Loader for the question bank from RON files.
///
/// RON format: `Vec<QuestionCard>`.
pub struct QuestionLoader;

impl QuestionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<QuestionCard>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses and validates cards: ids are unique and every answer is one of
    /// the card's options.
    pub fn parse(content: &str) -> LoadResult<Vec<QuestionCard>> {
        let cards: Vec<QuestionCard> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse question bank RON: {}", e))?;

        let mut seen = HashSet::new();
        for card in &cards {
            if !seen.insert(card.id) {
                anyhow::bail!("Duplicate question id {} in bank", card.id);
            }
            let answer = card.answer.trim();
            if !card
                .options
                .iter()
                .any(|option| option.trim().eq_ignore_ascii_case(answer))
            {
                anyhow::bail!("Question {} answer '{}' is not among its options", card.id, card.answer);
            }
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Difficulty, QuestionId};

    #[test]
    fn parses_cards_with_defaults() {
        let cards = QuestionLoader::parse(
            r#"[
                (
                    id: 10,
                    prompt: "Choose the verb",
                    options: ["table", "jump", "blue"],
                    answer: "jump",
                    difficulty: easy,
                ),
            ]"#,
        )
        .unwrap();

        assert_eq!(cards[0].id, QuestionId(10));
        assert_eq!(cards[0].difficulty, Difficulty::Easy);
        assert_eq!(cards[0].min_level, 1);
        assert_eq!(cards[0].hint, None);
    }

    #[test]
    fn answer_must_be_an_option() {
        let err = QuestionLoader::parse(
            r#"[(id: 1, prompt: "?", options: ["a", "b"], answer: "c", difficulty: hard)]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not among its options"));
    }
}
