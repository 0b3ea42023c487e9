//! Runtime configuration shared by the service and its collaborators.

use battle_core::BattleConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    /// Fixed base seed for reproducible battles. When absent every battle
    /// draws a fresh random seed.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    pub fn with_battle(battle: BattleConfig) -> Self {
        Self {
            battle,
            ..Self::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
