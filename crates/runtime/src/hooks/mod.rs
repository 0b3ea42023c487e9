//! Progression hooks the battle service reports to.
//!
//! The service forwards battle events (question answered, monster defeated,
//! battle won) to a [`QuestHook`] and merges the progress it returns into the
//! session snapshot. Quest rules live entirely behind the hook.

mod quests;

pub use quests::{QuestBoard, QuestDefinition, QuestGoal};

use async_trait::async_trait;
use battle_core::{CharacterId, MonsterId, QuestProgress};
use thiserror::Error;

/// Defines the criticality level of a hook for error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the whole action; the stored battle is untouched.
    Critical,

    /// Hook failure is logged with `warn!` and the action still succeeds.
    ///
    /// This is the default level.
    Important,

    /// Hook failure is ignored apart from a debug log.
    Optional,
}

/// Failure reported by a hook implementation.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type HookResult = std::result::Result<Vec<QuestProgress>, HookError>;

/// External quest progression collaborator.
///
/// Every method returns the quests whose progress changed because of the
/// event; the service folds them into the battle response.
#[async_trait]
pub trait QuestHook: Send + Sync {
    /// Name used in logs and in [`crate::RuntimeError::Hook`].
    fn name(&self) -> &'static str;

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    async fn on_question_answered(&self, character: CharacterId, correct: bool) -> HookResult;

    async fn on_monster_defeated(&self, character: CharacterId, monster: MonsterId) -> HookResult;

    async fn on_battle_won(&self, character: CharacterId) -> HookResult;
}

/// Hook that tracks nothing. Used when no quest system is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopQuestHook;

#[async_trait]
impl QuestHook for NoopQuestHook {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    async fn on_question_answered(&self, _: CharacterId, _: bool) -> HookResult {
        Ok(Vec::new())
    }

    async fn on_monster_defeated(&self, _: CharacterId, _: MonsterId) -> HookResult {
        Ok(Vec::new())
    }

    async fn on_battle_won(&self, _: CharacterId) -> HookResult {
        Ok(Vec::new())
    }
}
