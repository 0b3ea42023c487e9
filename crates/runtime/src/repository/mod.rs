//! Repository layer for data that changes while battles run.
//!
//! - [`BattleSessionStore`] keeps the running battle of each user in memory.
//! - [`CharacterRepository`] is the persistent character collaborator that
//!   receives statistics and rewards.
//!
//! Static content (monsters, questions) is served by oracles, not repositories.

mod error;
pub mod memory;
mod sessions;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::{CharacterRecord, InMemoryCharacterRepo};
pub use sessions::{BattleSessionStore, SessionSlot};
pub use traits::{CharacterRepository, CharacterStats, LevelProgress};
