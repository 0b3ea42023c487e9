//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use battle_core::{CharacterId, Difficulty, MonsterId};

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml`, `monsters.ron`, `questions.ron`
    /// and `characters.ron`.
    pub content_dir: PathBuf,
    /// Battle tuning file overriding `content_dir/config.toml`.
    pub battle_config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub monster: MonsterId,
    pub character: CharacterId,
    pub difficulty: Difficulty,
    /// Upper bound on autoplay steps.
    pub max_steps: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(battle_content::BUNDLED_DATA_DIR),
            battle_config: None,
            seed: None,
            monster: MonsterId(1),
            character: CharacterId(1),
            difficulty: Difficulty::Easy,
            max_steps: 200,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_CONTENT_DIR` - Content directory (default: bundled sample data)
    /// - `BATTLE_CONFIG` - Battle tuning TOML (default: `<content>/config.toml`)
    /// - `BATTLE_SEED` - Fixed seed for a reproducible battle (default: random)
    /// - `BATTLE_MONSTER` - Monster id to fight (default: 1)
    /// - `BATTLE_CHARACTER` - Character id to play (default: 1)
    /// - `BATTLE_DIFFICULTY` - `easy`, `medium` or `hard` (default: easy)
    /// - `BATTLE_MAX_STEPS` - Autoplay step limit (default: 200)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("BATTLE_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        config.battle_config = env::var("BATTLE_CONFIG").ok().map(PathBuf::from);
        config.seed = read_env::<u64>("BATTLE_SEED");

        if let Some(id) = read_env::<u64>("BATTLE_MONSTER") {
            config.monster = MonsterId(id);
        }
        if let Some(id) = read_env::<u64>("BATTLE_CHARACTER") {
            config.character = CharacterId(id);
        }
        if let Some(difficulty) = read_env::<Difficulty>("BATTLE_DIFFICULTY") {
            config.difficulty = difficulty;
        }
        if let Some(steps) = read_env::<usize>("BATTLE_MAX_STEPS") {
            config.max_steps = steps.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
