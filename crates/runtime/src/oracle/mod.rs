//! Runtime implementations of the `battle-core` content oracles.
//!
//! The data is immutable once loaded; running battles live in the
//! [`crate::repository::BattleSessionStore`].
mod monsters;
mod questions;

pub use monsters::MonsterCatalog;
pub use questions::QuestionBank;
