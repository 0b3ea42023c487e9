use crate::state::{BattleOutcome, BattlePhase, MonsterId, Reward};

/// Progress-relevant facts produced by an engine call, in the order they
/// happened. The runtime forwards these to the stats and quest collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BattleEvent {
    QuestionAnswered { correct: bool },
    MonsterDefeated { monster_id: MonsterId },
    BattleWon { reward: Reward },
    BattleLost,
}

/// Result of one engine call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub phase: BattlePhase,
    pub events: Vec<BattleEvent>,
}

impl TurnReport {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }
}
