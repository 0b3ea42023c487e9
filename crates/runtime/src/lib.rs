//! Runtime orchestration for quiz battles.
//!
//! This crate wires the pure rules of `battle-core` to the outside world: a
//! per-user session store, the character and quest collaborators, content
//! oracles, and an event bus. Consumers embed [`BattleService`] and call one
//! method per player action.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the action surface and its builder
//! - [`repository`] holds running battles and the character collaborator
//! - [`oracle`] serves monster and question content
//! - [`hooks`] forwards battle events to quest progression
//! - [`events`] publishes battle lifecycle notifications
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod repository;
pub mod service;
pub mod utils;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, SessionEvent};
pub use hooks::{
    HookCriticality, HookError, NoopQuestHook, QuestBoard, QuestDefinition, QuestGoal, QuestHook,
};
pub use oracle::{MonsterCatalog, QuestionBank};
pub use repository::{
    BattleSessionStore, CharacterRecord, CharacterRepository, CharacterStats,
    InMemoryCharacterRepo, LevelProgress, RepositoryError,
};
pub use service::{BattleService, BattleServiceBuilder};
pub use utils::{Clock, ManualClock, SystemClock};
