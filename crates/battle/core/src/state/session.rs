//! The battle session aggregate and its turn-control state.

use core::fmt;

use super::{
    ActiveQuestion, CharacterProfile, Difficulty, EffectSet, MonsterState, PlayerState,
    ResourceMeter, SessionId,
};
use crate::combat::MonsterAction;
use crate::env::{BattleEnv, MonsterTemplate, QuestionRequest, compute_seed};
use crate::error::BattleError;
use crate::snapshot::QuestProgress;

/// How a finished battle ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Turn ownership.
///
/// A single enum instead of independent flags: "player's turn" and "waiting
/// for monster resolution" cannot both hold, and the bard challenge suspends
/// both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BattlePhase {
    AwaitingPlayerAction,
    AwaitingMonsterResolution,
    AwaitingChallengeAnswer,
    Finished(BattleOutcome),
}

impl BattlePhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }

    pub const fn outcome(self) -> Option<BattleOutcome> {
        match self {
            Self::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingPlayerAction => f.write_str("awaiting_player_action"),
            Self::AwaitingMonsterResolution => f.write_str("awaiting_monster_resolution"),
            Self::AwaitingChallengeAnswer => f.write_str("awaiting_challenge_answer"),
            Self::Finished(outcome) => write!(f, "finished({outcome})"),
        }
    }
}

/// Player damage declared by an action, applied once during the next
/// monster resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingStrike {
    /// Unmitigated base damage.
    pub damage: u32,
    /// Charge strikes use the charge amplification and skip the guard term.
    pub charge: bool,
}

/// Narrative of the most recent player action and monster resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnLog {
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub monster_action: Option<MonsterAction>,
    pub messages: Vec<String>,
}

impl TurnLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }
}

/// Rewards granted by a victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
    /// Won through the bard challenge.
    pub challenge: bool,
}

/// Everything needed to open a battle.
#[derive(Clone, Debug)]
pub struct BattleSetup {
    pub session_id: SessionId,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub character: CharacterProfile,
    pub monster: MonsterTemplate,
}

/// One user's running encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub id: SessionId,
    /// Base seed; every random roll derives from it and `rolls`.
    pub seed: u64,
    /// Number of random rolls taken so far.
    pub rolls: u64,
    pub difficulty: Difficulty,
    pub player: PlayerState,
    pub monster: MonsterState,
    pub question: ActiveQuestion,
    pub phase: BattlePhase,
    pub pending: Option<PendingStrike>,
    /// Completed monster resolutions.
    pub round: u32,
    pub log: TurnLog,
    pub reward: Option<Reward>,
    pub quests: Vec<QuestProgress>,
}

impl BattleSession {
    const QUESTION_CONTEXT: u32 = 0x51;

    /// Opens a battle with both sides at full resources and the first
    /// question drawn.
    pub fn start(setup: BattleSetup, env: &BattleEnv<'_>) -> Result<Self, BattleError> {
        let player = setup.character.to_player_state(env.config);
        let template = setup.monster;
        let monster = MonsterState {
            id: template.id,
            kind: template.kind,
            name: template.name,
            hp: ResourceMeter::full(template.max_hp),
            damage: template.damage,
            defense: template.defense,
            defending: false,
            effects: EffectSet::empty(),
            streak: None,
        };

        let request = QuestionRequest {
            difficulty: setup.difficulty,
            level: player.level,
            exclude: None,
        };
        let card = env
            .questions
            .draw(&request, compute_seed(setup.seed, 0, 0, 0))?;

        let mut log = TurnLog::default();
        log.push(format!("A wild {} appears!", monster.name));

        Ok(Self {
            id: setup.session_id,
            seed: setup.seed,
            rolls: 1,
            difficulty: setup.difficulty,
            player,
            monster,
            question: ActiveQuestion::from_card(card),
            phase: BattlePhase::AwaitingPlayerAction,
            pending: None,
            round: 0,
            log,
            reward: None,
            quests: Vec::new(),
        })
    }

    /// Derives the seed for the next random roll.
    pub fn next_seed(&mut self, context: u32) -> u64 {
        let seed = compute_seed(self.seed, self.rolls, self.round, context);
        self.rolls += 1;
        seed
    }

    /// Draws a replacement question of the session difficulty for the
    /// player's level, avoiding the current one when possible.
    ///
    /// The session is only touched (roll counter) if the draw succeeds.
    pub fn draw_question(&mut self, env: &BattleEnv<'_>) -> Result<ActiveQuestion, BattleError> {
        let request = QuestionRequest {
            difficulty: self.difficulty,
            level: self.player.level,
            exclude: Some(self.question.id),
        };
        let seed = compute_seed(self.seed, self.rolls, self.round, Self::QUESTION_CONTEXT);
        let card = env.questions.draw(&request, seed)?;
        self.rolls += 1;
        Ok(ActiveQuestion::from_card(card))
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }
}
