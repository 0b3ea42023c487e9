//! Battle state model.
//!
//! [`BattleSession`] is the aggregate root; everything else in this module is
//! a component of it.
mod combatant;
mod effects;
mod ids;
mod question;
mod session;

pub use combatant::{
    Attributes, CharacterClass, CharacterProfile, MonsterKind, MonsterState, PlayerState,
    PrimaryStat, ResourceMeter,
};
pub use effects::{AttackStreak, Effect, EffectKind, EffectSet, Side};
pub use ids::{CharacterId, MonsterId, QuestionId, SessionId, UserId};
pub use question::{ActiveQuestion, Difficulty, QuestionCard};
pub use session::{
    BattleOutcome, BattlePhase, BattleSession, BattleSetup, PendingStrike, Reward, TurnLog,
};
