//! Builder for [`BattleService`] with flexible configuration.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use battle_core::{MonsterOracle, PcgRng, QuestionOracle, RngOracle};

use super::BattleService;
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::hooks::{NoopQuestHook, QuestHook};
use crate::repository::{BattleSessionStore, CharacterRepository};
use crate::utils::{Clock, SystemClock};

pub struct BattleServiceBuilder {
    config: RuntimeConfig,
    characters: Arc<dyn CharacterRepository>,
    monsters: Arc<dyn MonsterOracle>,
    questions: Arc<dyn QuestionOracle>,
    quests: Arc<dyn QuestHook>,
    rng: Arc<dyn RngOracle>,
    clock: Arc<dyn Clock>,
}

impl BattleServiceBuilder {
    pub(super) fn new(
        characters: Arc<dyn CharacterRepository>,
        monsters: Arc<dyn MonsterOracle>,
        questions: Arc<dyn QuestionOracle>,
    ) -> Self {
        Self {
            config: RuntimeConfig::default(),
            characters,
            monsters,
            questions,
            quests: Arc::new(NoopQuestHook),
            rng: Arc::new(PcgRng),
            clock: Arc::new(SystemClock),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Quest progression collaborator. Defaults to [`NoopQuestHook`].
    pub fn quest_hook(mut self, hook: Arc<dyn QuestHook>) -> Self {
        self.quests = hook;
        self
    }

    /// Random source for monster choices and question draws. Defaults to
    /// [`PcgRng`].
    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> BattleService {
        let events = EventBus::with_capacity(self.config.event_buffer_size);
        BattleService {
            config: self.config,
            store: BattleSessionStore::new(),
            characters: self.characters,
            monsters: self.monsters,
            questions: self.questions,
            quests: self.quests,
            rng: self.rng,
            clock: self.clock,
            events,
            next_session: AtomicU64::new(1),
        }
    }
}
