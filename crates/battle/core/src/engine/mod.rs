//! Turn sequencer.
//!
//! [`BattleEngine`] is the only writer of a [`BattleSession`]. Every call runs
//! a two-phase pipeline: `pre_validate` checks every precondition against an
//! immutable borrow, then `apply` mutates. A call rejected by validation
//! leaves the session unchanged; an oracle failure during `apply` may not, so
//! callers that need atomicity run the engine on a copy.
//!
//! ```text
//! AwaitingPlayerAction --attack/defend/skill--> AwaitingMonsterResolution
//! AwaitingPlayerAction --bard skill-----------> AwaitingChallengeAnswer
//! AwaitingPlayerAction --wrong answer/skip----> (inline resolution) --> AwaitingPlayerAction | Finished
//! AwaitingMonsterResolution --resolve---------> AwaitingPlayerAction | Finished
//! AwaitingChallengeAnswer --answer------------> Finished
//! ```

mod answer;
mod events;
mod resolution;
mod validation;

pub use events::{BattleEvent, TurnReport};

use crate::combat::{ClassSkill, apply_class_skill, check_class_skill, player_base_damage};
use crate::env::BattleEnv;
use crate::error::BattleError;
use crate::state::{BattlePhase, BattleSession, PendingStrike, QuestionId, TurnLog};

/// Player declarations addressable by name.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(ascii_case_insensitive)]
pub enum PlayerAction {
    #[strum(to_string = "attack")]
    Attack,
    #[strum(to_string = "defend")]
    Defend,
    #[strum(to_string = "skill", serialize = "useskill", serialize = "use_skill")]
    UseSkill,
}

/// One step of the state machine.
trait Transition {
    fn pre_validate(&self, session: &BattleSession, env: &BattleEnv<'_>) -> Result<(), BattleError>;

    fn apply(
        &self,
        session: &mut BattleSession,
        env: &BattleEnv<'_>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError>;
}

struct Declare(PlayerAction);

impl Transition for Declare {
    fn pre_validate(&self, session: &BattleSession, env: &BattleEnv<'_>) -> Result<(), BattleError> {
        validation::ensure_player_can_act(session)?;
        let costs = &env.config.costs;
        match self.0 {
            PlayerAction::Attack => validation::ensure_energy(session, costs.attack),
            PlayerAction::Defend => validation::ensure_energy(session, costs.defend),
            PlayerAction::UseSkill => {
                validation::ensure_skill_enabled(session)?;
                validation::ensure_energy(session, costs.skill)?;
                check_class_skill(session)
            }
        }
    }

    fn apply(
        &self,
        session: &mut BattleSession,
        env: &BattleEnv<'_>,
        _events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let costs = &env.config.costs;
        let (cost, next_phase) = match self.0 {
            PlayerAction::Attack => {
                let damage = player_base_damage(&session.player);
                session.pending = Some(PendingStrike {
                    damage,
                    charge: false,
                });
                session.log.push(format!("You attack for {damage} damage."));
                (costs.attack, BattlePhase::AwaitingMonsterResolution)
            }
            PlayerAction::Defend => {
                session.player.defending = true;
                session.log.push("You raise your guard.");
                (costs.defend, BattlePhase::AwaitingMonsterResolution)
            }
            PlayerAction::UseSkill => {
                let skill = apply_class_skill(session, env)?;
                let next = if skill == ClassSkill::SilverTongue {
                    BattlePhase::AwaitingChallengeAnswer
                } else {
                    BattlePhase::AwaitingMonsterResolution
                };
                (costs.skill, next)
            }
        };
        session.player.energy.spend(cost);
        session.phase = next_phase;
        Ok(())
    }
}

struct Answer<'s> {
    question_id: QuestionId,
    answer: &'s str,
}

impl Transition for Answer<'_> {
    fn pre_validate(&self, session: &BattleSession, _env: &BattleEnv<'_>) -> Result<(), BattleError> {
        answer::validate(session, self.question_id)
    }

    fn apply(
        &self,
        session: &mut BattleSession,
        env: &BattleEnv<'_>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        answer::apply(session, self.answer, env, events)
    }
}

struct ResolveMonsterTurn;

impl Transition for ResolveMonsterTurn {
    fn pre_validate(&self, session: &BattleSession, _env: &BattleEnv<'_>) -> Result<(), BattleError> {
        validation::ensure_phase(session, BattlePhase::AwaitingMonsterResolution)
    }

    fn apply(
        &self,
        session: &mut BattleSession,
        env: &BattleEnv<'_>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        resolution::run(session, env, events)
    }
}

struct SkipTurn;

impl Transition for SkipTurn {
    fn pre_validate(&self, session: &BattleSession, _env: &BattleEnv<'_>) -> Result<(), BattleError> {
        validation::ensure_phase(session, BattlePhase::AwaitingPlayerAction)?;
        if !session.player.is_stunned() {
            return Err(BattleError::NotStunned);
        }
        Ok(())
    }

    fn apply(
        &self,
        session: &mut BattleSession,
        env: &BattleEnv<'_>,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        session.log.push("You are stunned and lose the turn.");
        resolution::run(session, env, events)
    }
}

/// Authoritative reducer for a [`BattleSession`].
pub struct BattleEngine<'a> {
    session: &'a mut BattleSession,
}

impl<'a> BattleEngine<'a> {
    pub fn new(session: &'a mut BattleSession) -> Self {
        Self { session }
    }

    /// Declares an attack: spends energy and queues the strike.
    pub fn attack(&mut self, env: &BattleEnv<'_>) -> Result<TurnReport, BattleError> {
        self.perform(PlayerAction::Attack, env)
    }

    pub fn defend(&mut self, env: &BattleEnv<'_>) -> Result<TurnReport, BattleError> {
        self.perform(PlayerAction::Defend, env)
    }

    pub fn use_skill(&mut self, env: &BattleEnv<'_>) -> Result<TurnReport, BattleError> {
        self.perform(PlayerAction::UseSkill, env)
    }

    pub fn perform(
        &mut self,
        action: PlayerAction,
        env: &BattleEnv<'_>,
    ) -> Result<TurnReport, BattleError> {
        self.drive(&Declare(action), env)
    }

    /// Answers the current question (or the bard challenge).
    pub fn answer(
        &mut self,
        question_id: QuestionId,
        answer: &str,
        env: &BattleEnv<'_>,
    ) -> Result<TurnReport, BattleError> {
        self.drive(
            &Answer {
                question_id,
                answer,
            },
            env,
        )
    }

    pub fn resolve_monster_turn(&mut self, env: &BattleEnv<'_>) -> Result<TurnReport, BattleError> {
        self.drive(&ResolveMonsterTurn, env)
    }

    /// The only legal action while stunned.
    pub fn skip_turn(&mut self, env: &BattleEnv<'_>) -> Result<TurnReport, BattleError> {
        self.drive(&SkipTurn, env)
    }

    fn drive<T: Transition>(
        &mut self,
        transition: &T,
        env: &BattleEnv<'_>,
    ) -> Result<TurnReport, BattleError> {
        transition.pre_validate(self.session, env)?;

        let mut events = Vec::new();
        self.session.log = TurnLog::default();
        transition.apply(self.session, env, &mut events)?;

        debug_assert!(self.session.player.energy.current() <= self.session.player.energy.maximum());

        Ok(TurnReport {
            phase: self.session.phase,
            events,
        })
    }
}

#[cfg(test)]
mod tests;
