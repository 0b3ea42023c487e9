//! Repository contract for the persistent character collaborator.

use battle_core::{CharacterId, CharacterProfile, Reward};

use super::Result;

/// Lifetime statistics recorded for a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CharacterStats {
    pub questions_right: u32,
    pub questions_wrong: u32,
    pub battles_won: u32,
    pub battles_lost: u32,
    pub total_xp: u64,
    pub total_gold: u64,
}

/// Level and experience after a reward was granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LevelProgress {
    pub level: u32,
    pub xp: u32,
    pub levels_gained: u32,
}

/// Character persistence consumed by the battle service.
///
/// Battles only read the profile when they start and report facts as they
/// happen; how progression is stored belongs to the implementation.
pub trait CharacterRepository: Send + Sync {
    /// Load the profile a new battle is built from.
    fn profile(&self, id: CharacterId) -> Result<Option<CharacterProfile>>;

    /// Count one answered question.
    fn record_answer(&self, id: CharacterId, correct: bool) -> Result<()>;

    /// Grant a victory reward and run the level-up check.
    fn record_victory(&self, id: CharacterId, reward: Reward) -> Result<LevelProgress>;

    /// Count one lost battle.
    fn record_defeat(&self, id: CharacterId) -> Result<()>;
}
