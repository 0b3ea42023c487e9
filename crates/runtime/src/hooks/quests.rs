//! In-memory quest tracker.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::{CharacterId, MonsterId, QuestProgress};

use super::{HookError, HookResult, QuestHook};

/// What advances a quest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestGoal {
    CorrectAnswers,
    DefeatMonster(MonsterId),
    WinBattles,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestDefinition {
    pub id: u64,
    pub title: String,
    pub goal: QuestGoal,
    pub target: u32,
}

/// [`QuestHook`] keeping per-character progress for a fixed quest list.
///
/// Every character has every quest active. Completed quests stop advancing
/// and are no longer reported.
pub struct QuestBoard {
    quests: Vec<QuestDefinition>,
    progress: Mutex<HashMap<(CharacterId, u64), u32>>,
}

impl QuestBoard {
    pub fn new(quests: Vec<QuestDefinition>) -> Self {
        Self {
            quests,
            progress: Mutex::new(HashMap::new()),
        }
    }

    /// Current progress of every quest for `character`.
    pub fn progress_of(&self, character: CharacterId) -> Result<Vec<QuestProgress>, HookError> {
        let progress = self
            .progress
            .lock()
            .map_err(|_| HookError::new("quest progress lock poisoned"))?;
        Ok(self
            .quests
            .iter()
            .map(|quest| {
                let done = progress.get(&(character, quest.id)).copied().unwrap_or(0);
                view(quest, done)
            })
            .collect())
    }

    fn advance(&self, character: CharacterId, matches: impl Fn(&QuestGoal) -> bool) -> HookResult {
        let mut progress = self
            .progress
            .lock()
            .map_err(|_| HookError::new("quest progress lock poisoned"))?;

        let mut updated = Vec::new();
        for quest in self.quests.iter().filter(|quest| matches(&quest.goal)) {
            let done = progress.entry((character, quest.id)).or_insert(0);
            if *done >= quest.target {
                continue;
            }
            *done += 1;
            updated.push(view(quest, *done));
        }
        Ok(updated)
    }
}

fn view(quest: &QuestDefinition, done: u32) -> QuestProgress {
    QuestProgress {
        quest_id: quest.id,
        title: quest.title.clone(),
        progress: done.min(quest.target),
        target: quest.target,
        completed: done >= quest.target,
    }
}

#[async_trait]
impl QuestHook for QuestBoard {
    fn name(&self) -> &'static str {
        "quest_board"
    }

    async fn on_question_answered(&self, character: CharacterId, correct: bool) -> HookResult {
        if !correct {
            return Ok(Vec::new());
        }
        self.advance(character, |goal| matches!(goal, QuestGoal::CorrectAnswers))
    }

    async fn on_monster_defeated(&self, character: CharacterId, monster: MonsterId) -> HookResult {
        self.advance(character, |goal| *goal == QuestGoal::DefeatMonster(monster))
    }

    async fn on_battle_won(&self, character: CharacterId) -> HookResult {
        self.advance(character, |goal| matches!(goal, QuestGoal::WinBattles))
    }
}
