//! Content factory for loading every data file from one directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, CharacterProfile, MonsterTemplate, QuestionCard};

use crate::loaders::{CharacterLoader, ConfigLoader, LoadResult, MonsterLoader, QuestionLoader};

/// Content factory that loads battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── monsters.ron
/// ├── questions.ron
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::BUNDLED_DATA_DIR)
    }

    /// Load battle tuning from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the monster catalog from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<Vec<MonsterTemplate>> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load the question bank from `questions.ron`.
    pub fn load_questions(&self) -> LoadResult<Vec<QuestionCard>> {
        QuestionLoader::load(&self.data_dir.join("questions.ron"))
    }

    /// Load the character roster from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<CharacterProfile>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
