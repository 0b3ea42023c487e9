//! Read-only projection of a session for clients.
//!
//! The snapshot never carries the answer key. Turn-ownership flags are derived
//! from [`BattlePhase`], so at most one of `is_player_turn` and
//! `waiting_for_monster_resolution` is ever set.

use crate::state::{
    BattleOutcome, BattlePhase, BattleSession, CharacterClass, Difficulty, Effect, EffectKind,
    MonsterId, MonsterKind, QuestionId, Reward, SessionId, TurnLog,
};

/// Progress of one active quest, as reported by the quest collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestProgress {
    pub quest_id: u64,
    pub title: String,
    pub progress: u32,
    pub target: u32,
    pub completed: bool,
}

/// Folds `updates` into `quests`, replacing entries with the same quest id
/// and appending new ones.
pub fn merge_quest_progress(quests: &mut Vec<QuestProgress>, updates: Vec<QuestProgress>) {
    for update in updates {
        match quests.iter_mut().find(|q| q.quest_id == update.quest_id) {
            Some(existing) => *existing = update,
            None => quests.push(update),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub name: String,
    pub class: CharacterClass,
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub strength: u32,
    pub intelligence: u32,
    pub defense: u32,
    pub level: u32,
    pub xp: u32,
    pub defending: bool,
    pub effects: Vec<Effect>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterView {
    pub id: MonsterId,
    pub name: String,
    pub kind: MonsterKind,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    pub defense: u32,
    pub defending: bool,
    pub effects: Vec<Effect>,
    pub guaranteed_attacks: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionView {
    pub id: QuestionId,
    /// `None` while a hide-question effect is active.
    pub prompt: Option<String>,
    pub options: Vec<String>,
    pub min_level: u32,
    pub difficulty: Difficulty,
    pub hint: Option<String>,
    pub deadline_ms: Option<u64>,
    pub scrambled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub difficulty: Difficulty,
    pub round: u32,
    pub player: PlayerView,
    pub monster: MonsterView,
    /// Absent once the battle is over.
    pub question: Option<QuestionView>,
    pub is_player_turn: bool,
    pub waiting_for_monster_resolution: bool,
    pub bard_challenge_active: bool,
    pub finished: bool,
    pub outcome: Option<BattleOutcome>,
    pub pending_damage: u32,
    pub last_turn: TurnLog,
    pub reward: Option<Reward>,
    pub quests: Vec<QuestProgress>,
}

impl SessionSnapshot {
    pub fn from_session(session: &BattleSession) -> Self {
        let player = &session.player;
        let monster = &session.monster;

        let question = (!session.is_finished()).then(|| {
            let hidden = player.effects.has(EffectKind::HideQuestion);
            QuestionView {
                id: session.question.id,
                prompt: (!hidden).then(|| session.question.prompt.clone()),
                options: session.question.options.clone(),
                min_level: session.question.min_level,
                difficulty: session.question.difficulty,
                hint: session.question.revealed_hint.clone(),
                deadline_ms: session.question.deadline_ms,
                scrambled: player.effects.has(EffectKind::ScrambleQuestion),
            }
        });

        let mut monster_effects: Vec<Effect> = monster.effects.iter().cloned().collect();
        if let Some(streak) = &monster.streak {
            monster_effects.push(streak.buff.clone());
        }

        Self {
            session_id: session.id,
            difficulty: session.difficulty,
            round: session.round,
            player: PlayerView {
                name: player.name.clone(),
                class: player.class,
                hp: player.hp.current(),
                max_hp: player.hp.maximum(),
                energy: player.energy.current(),
                max_energy: player.energy.maximum(),
                strength: player.attributes.strength,
                intelligence: player.attributes.intelligence,
                defense: player.attributes.defense,
                level: player.level,
                xp: player.xp,
                defending: player.defending,
                effects: player.effects.iter().cloned().collect(),
            },
            monster: MonsterView {
                id: monster.id,
                name: monster.name.clone(),
                kind: monster.kind,
                hp: monster.hp.current(),
                max_hp: monster.hp.maximum(),
                damage: monster.damage,
                defense: monster.defense,
                defending: monster.defending,
                effects: monster_effects,
                guaranteed_attacks: monster
                    .streak
                    .as_ref()
                    .map_or(0, |streak| streak.attacks_remaining),
            },
            question,
            is_player_turn: session.phase == BattlePhase::AwaitingPlayerAction,
            waiting_for_monster_resolution: session.phase
                == BattlePhase::AwaitingMonsterResolution,
            bard_challenge_active: session.phase == BattlePhase::AwaitingChallengeAnswer,
            finished: session.is_finished(),
            outcome: session.phase.outcome(),
            pending_damage: session.pending.map_or(0, |strike| strike.damage),
            last_turn: session.log.clone(),
            reward: session.reward,
            quests: session.quests.clone(),
        }
    }
}
