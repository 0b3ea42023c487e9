//! In-memory CharacterRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::{CharacterId, CharacterProfile, LevelingConfig, Reward};

use crate::repository::{
    CharacterRepository, CharacterStats, LevelProgress, RepositoryError, Result,
};

/// Everything stored for one character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterRecord {
    pub profile: CharacterProfile,
    pub gold: u64,
    pub skill_points: u32,
    pub stats: CharacterStats,
}

impl CharacterRecord {
    pub fn new(profile: CharacterProfile) -> Self {
        Self {
            profile,
            gold: 0,
            skill_points: 0,
            stats: CharacterStats::default(),
        }
    }

    /// Adds experience and levels up while the curve allows, carrying the
    /// remainder into the next level.
    fn gain_xp(&mut self, xp: u32, leveling: &LevelingConfig) -> LevelProgress {
        let profile = &mut self.profile;
        profile.xp = profile.xp.saturating_add(xp);

        let mut levels_gained = 0;
        loop {
            let needed = leveling.xp_for_next_level(profile.level).max(1);
            if profile.xp < needed {
                break;
            }
            profile.xp -= needed;
            profile.level += 1;
            self.skill_points += 1;
            levels_gained += 1;
        }

        LevelProgress {
            level: profile.level,
            xp: profile.xp,
            levels_gained,
        }
    }
}

/// In-memory implementation of [`CharacterRepository`].
pub struct InMemoryCharacterRepo {
    records: RwLock<HashMap<CharacterId, CharacterRecord>>,
    leveling: LevelingConfig,
}

impl InMemoryCharacterRepo {
    pub fn new(leveling: LevelingConfig) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            leveling,
        }
    }

    /// Create a repository holding `profiles` with zeroed statistics.
    pub fn with_profiles(
        leveling: LevelingConfig,
        profiles: impl IntoIterator<Item = CharacterProfile>,
    ) -> Self {
        let records = profiles
            .into_iter()
            .map(|profile| (profile.id, CharacterRecord::new(profile)))
            .collect();
        Self {
            records: RwLock::new(records),
            leveling,
        }
    }

    pub fn insert(&self, profile: CharacterProfile) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(profile.id, CharacterRecord::new(profile));
        Ok(())
    }

    /// Full stored record, statistics included.
    pub fn record(&self, id: CharacterId) -> Result<Option<CharacterRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.get(&id).cloned())
    }

    fn update<T>(&self, id: CharacterId, f: impl FnOnce(&mut CharacterRecord) -> T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let record = records
            .get_mut(&id)
            .ok_or(RepositoryError::CharacterMissing(id))?;
        Ok(f(record))
    }
}

impl Default for InMemoryCharacterRepo {
    fn default() -> Self {
        Self::new(LevelingConfig::default())
    }
}

impl CharacterRepository for InMemoryCharacterRepo {
    fn profile(&self, id: CharacterId) -> Result<Option<CharacterProfile>> {
        Ok(self.record(id)?.map(|record| record.profile))
    }

    fn record_answer(&self, id: CharacterId, correct: bool) -> Result<()> {
        self.update(id, |record| {
            if correct {
                record.stats.questions_right += 1;
            } else {
                record.stats.questions_wrong += 1;
            }
        })
    }

    fn record_victory(&self, id: CharacterId, reward: Reward) -> Result<LevelProgress> {
        let leveling = &self.leveling;
        self.update(id, |record| {
            record.stats.battles_won += 1;
            record.stats.total_xp += u64::from(reward.xp);
            record.stats.total_gold += u64::from(reward.gold);
            record.gold += u64::from(reward.gold);
            record.gain_xp(reward.xp, leveling)
        })
    }

    fn record_defeat(&self, id: CharacterId) -> Result<()> {
        self.update(id, |record| record.stats.battles_lost += 1)
    }
}
