//! Deterministic battle rules shared by the runtime and offline tools.
//!
//! `battle-core` defines the canonical combat rules for a player-versus-monster
//! encounter: the session data model, temporal effects, damage mitigation,
//! class and monster skills, and the turn state machine. All mutation of a
//! [`BattleSession`] flows through [`engine::BattleEngine`]; everything the
//! rules need from the outside world (tuning, randomness, question draws, the
//! current time) is injected through [`env::BattleEnv`].
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod snapshot;
pub mod state;

pub use combat::{ClassSkill, MonsterAction, MonsterSkill, SkillProfile};
pub use config::{
    ActionCosts, BattleConfig, EnergyConfig, LevelingConfig, MitigationConfig, RewardConfig,
    SkillTuning,
};
pub use engine::{BattleEngine, BattleEvent, PlayerAction, TurnReport};
pub use env::{
    BattleEnv, FixedRng, MonsterOracle, MonsterTemplate, OracleError, PcgRng, QuestionOracle,
    QuestionRequest, RngOracle, compute_seed,
};
pub use error::{BattleError, ErrorSeverity, GameError};
pub use snapshot::{
    MonsterView, PlayerView, QuestProgress, QuestionView, SessionSnapshot, merge_quest_progress,
};
pub use state::{
    ActiveQuestion, AttackStreak, Attributes, BattleOutcome, BattlePhase, BattleSession,
    BattleSetup, CharacterClass, CharacterId, CharacterProfile, Difficulty, Effect, EffectKind,
    EffectSet, MonsterId, MonsterKind, MonsterState, PendingStrike, PlayerState, PrimaryStat,
    QuestionCard, QuestionId, ResourceMeter, Reward, SessionId, Side, TurnLog, UserId,
};
