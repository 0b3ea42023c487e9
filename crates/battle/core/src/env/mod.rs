//! Traits describing everything the rules consume from the outside world.
//!
//! The [`BattleEnv`] aggregate bundles tuning, randomness, the question source,
//! and the current time so the engine stays free of I/O and ambient state.
mod error;
mod monsters;
mod questions;
mod rng;

pub use error::OracleError;
pub use monsters::{MonsterOracle, MonsterTemplate};
pub use questions::{QuestionOracle, QuestionRequest};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed};

use crate::config::BattleConfig;

/// Borrowed collaborators for one engine invocation.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    pub config: &'a BattleConfig,
    pub rng: &'a dyn RngOracle,
    pub questions: &'a dyn QuestionOracle,
    /// Wall-clock milliseconds at the time of the call.
    pub now_ms: u64,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        config: &'a BattleConfig,
        rng: &'a dyn RngOracle,
        questions: &'a dyn QuestionOracle,
        now_ms: u64,
    ) -> Self {
        Self {
            config,
            rng,
            questions,
            now_ms,
        }
    }
}
