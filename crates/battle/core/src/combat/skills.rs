//! Class and monster skill tables and their appliers.
//!
//! Dispatch is an exhaustive match on identity enums, so adding a class or a
//! monster without a skill entry fails to compile.

use core::fmt;

use super::damage::{incoming_damage, monster_outgoing_damage, player_base_damage};
use crate::config::BattleConfig;
use crate::env::BattleEnv;
use crate::error::BattleError;
use crate::state::{
    AttackStreak, BattleSession, CharacterClass, Effect, EffectKind, MonsterKind, PendingStrike,
    Side,
};

/// Special ability of each character class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ClassSkill {
    /// Restore a fixed amount of hp, capped at the maximum.
    Heal,
    /// A free defend.
    Block,
    /// Amplified pending strike that ignores the guard posture.
    Charge,
    /// Remove one incorrect option.
    Clairvoyance,
    /// Reveal the question's hint.
    Insight,
    /// All-or-nothing challenge question.
    SilverTongue,
}

impl ClassSkill {
    pub const fn of(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Paladin => Self::Heal,
            CharacterClass::Tank => Self::Block,
            CharacterClass::Fighter => Self::Charge,
            CharacterClass::Mage => Self::Clairvoyance,
            CharacterClass::Rogue => Self::Insight,
            CharacterClass::Bard => Self::SilverTongue,
        }
    }
}

/// Special ability of each monster. Malak owns three variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum MonsterSkill {
    SingularStrike,
    WhirlwindQuestion,
    Ignorance,
    SyntaxCollapse,
    WhQuestionVolley,
    SemanticDrain,
    AmnesiaBlast,
    SyllableScramble,
    LexicalBlindness,
}

/// Static tuning of a monster skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillProfile {
    pub title: &'static str,
    pub effect: EffectKind,
    pub target: Side,
    pub magnitude: u32,
    /// Resolutions the effect lasts; forced attacks for a streak.
    pub duration: u32,
    /// Whether the skill also lands a standard attack.
    pub attacks: bool,
}

impl MonsterSkill {
    const MALAK_VARIANTS: [MonsterSkill; 3] = [
        MonsterSkill::AmnesiaBlast,
        MonsterSkill::SyllableScramble,
        MonsterSkill::LexicalBlindness,
    ];

    /// Skill used by `kind`. Only Malak consults `roll`.
    pub const fn for_monster(kind: MonsterKind, roll: u32) -> Self {
        match kind {
            MonsterKind::ErrantImp => Self::SingularStrike,
            MonsterKind::InquiringHarpy => Self::WhirlwindQuestion,
            MonsterKind::DementedZombie => Self::Ignorance,
            MonsterKind::SyntaxSkeleton => Self::SyntaxCollapse,
            MonsterKind::QuestioningCentaur => Self::WhQuestionVolley,
            MonsterKind::Lexicographer => Self::SemanticDrain,
            MonsterKind::Malak => Self::MALAK_VARIANTS[(roll % 3) as usize],
        }
    }

    pub const fn profile(self) -> SkillProfile {
        use EffectKind::*;
        let (title, effect, target, magnitude, duration, attacks) = match self {
            Self::SingularStrike => ("Singular Strike", DamageBuff, Side::Monster, 50, 2, false),
            // magnitude is the scramble chance in percent
            Self::WhirlwindQuestion => (
                "Whirlwind Question",
                ScrambleQuestion,
                Side::Player,
                50,
                1,
                true,
            ),
            Self::Ignorance => ("Ignorance", DamageReduction, Side::Monster, 50, 1, false),
            Self::SyntaxCollapse => ("Syntax Collapse", Stun, Side::Player, 0, 1, true),
            Self::WhQuestionVolley => (
                "Wh-Question Volley",
                ExtraQuestion,
                Side::Player,
                0,
                1,
                false,
            ),
            Self::SemanticDrain => ("Semantic Drain", Corruption, Side::Player, 10, 3, false),
            Self::AmnesiaBlast => ("Amnesia Blast", DisableSkill, Side::Player, 0, 1, false),
            Self::SyllableScramble => (
                "Syllable Scramble",
                BlockEnergyRecovery,
                Side::Player,
                0,
                1,
                false,
            ),
            Self::LexicalBlindness => ("Lexical Blindness", HideQuestion, Side::Player, 0, 1, false),
        };
        SkillProfile {
            title,
            effect,
            target,
            magnitude,
            duration,
            attacks,
        }
    }

    fn effect(self) -> Effect {
        let profile = self.profile();
        Effect::new(profile.effect, profile.magnitude, profile.duration, profile.title)
    }
}

/// What the monster did during a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MonsterAction {
    Attack,
    Defend,
    Skill(MonsterSkill),
}

impl MonsterAction {
    /// Uniform choice among attack, defend, and skill.
    pub fn from_roll(kind: MonsterKind, roll: u32, skill_roll: u32) -> Self {
        match roll % 3 {
            0 => Self::Attack,
            1 => Self::Defend,
            _ => Self::Skill(MonsterSkill::for_monster(kind, skill_roll)),
        }
    }
}

impl fmt::Display for MonsterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack => f.write_str("attack"),
            Self::Defend => f.write_str("defend"),
            Self::Skill(skill) => write!(f, "skill:{skill}"),
        }
    }
}

/// Rejects a class skill whose own precondition does not hold.
pub fn check_class_skill(session: &BattleSession) -> Result<(), BattleError> {
    match ClassSkill::of(session.player.class) {
        ClassSkill::Clairvoyance if session.question.incorrect_options().is_empty() => {
            Err(BattleError::NothingToReveal)
        }
        _ => Ok(()),
    }
}

/// Applies the player's class skill. Fails only before any mutation.
pub fn apply_class_skill(
    session: &mut BattleSession,
    env: &BattleEnv<'_>,
) -> Result<ClassSkill, BattleError> {
    let skill = ClassSkill::of(session.player.class);
    match skill {
        ClassSkill::Heal => {
            let healed = session.player.hp.restore(env.config.skills.heal_amount);
            session.log.push(format!("You cast Heal and recover {healed} hp."));
        }
        ClassSkill::Block => {
            session.player.defending = true;
            session.log.push("You brace yourself to block the next blow.");
        }
        ClassSkill::Charge => {
            let damage = player_base_damage(&session.player);
            session.pending = Some(PendingStrike {
                damage,
                charge: true,
            });
            session.log.push("You charge at the monster!");
        }
        ClassSkill::Clairvoyance => {
            let seed = session.next_seed(SKILL_CONTEXT);
            match session.question.reveal_incorrect(env.rng, seed) {
                Some(removed) => session
                    .log
                    .push(format!("Clairvoyance reveals that '{removed}' is wrong.")),
                None => return Err(BattleError::NothingToReveal),
            }
        }
        ClassSkill::Insight => {
            let hint = session.question.insight();
            session.log.push(format!("Insight: {hint}"));
            session.question.revealed_hint = Some(hint);
        }
        ClassSkill::SilverTongue => {
            let challenge = session.draw_question(env)?;
            session.question = challenge;
            session
                .log
                .push("Silver Tongue! Answer correctly to win outright, or fall.");
        }
    }
    Ok(skill)
}

/// Lands a standard monster attack on the player. Returns hp lost.
///
/// A damage-reduction effect on the player is consumed by the blow it softens.
pub fn land_monster_attack(session: &mut BattleSession, config: &BattleConfig) -> u32 {
    let damage = incoming_damage(&session.monster, &session.player, &config.mitigation);
    if monster_outgoing_damage(&session.monster) > 0 {
        session.player.effects.remove(EffectKind::DamageReduction);
    }
    let dealt = session.player.hp.drain(damage);
    session.log.damage_taken = session.log.damage_taken.saturating_add(dealt);
    session
        .log
        .push(format!("{} attacks! You take {dealt} damage.", session.monster.name));
    dealt
}

/// Applies a monster skill. New effects are fresh so they outlive the tick of
/// the resolution that applied them.
pub fn apply_monster_skill(
    session: &mut BattleSession,
    skill: MonsterSkill,
    env: &BattleEnv<'_>,
) -> Result<(), BattleError> {
    let profile = skill.profile();
    session.log.push(format!(
        "{} uses {}!",
        session.monster.name, profile.title
    ));

    if profile.attacks {
        land_monster_attack(session, env.config);
    }

    match skill {
        MonsterSkill::SingularStrike => {
            session.monster.streak = Some(AttackStreak::new(skill.effect(), profile.duration));
        }
        MonsterSkill::WhirlwindQuestion => {
            let roll = env.rng.roll_d100(session.next_seed(SKILL_CONTEXT));
            if roll <= profile.magnitude {
                session.player.effects.add(skill.effect().fresh());
                let seed = session.next_seed(SKILL_CONTEXT + 1);
                session.question.scramble(env.rng, seed);
                session.log.push("The question is scrambled by the whirlwind!");
            }
        }
        MonsterSkill::Ignorance => {
            session.monster.effects.add(skill.effect().fresh());
        }
        MonsterSkill::WhQuestionVolley => {
            let mut extra = session.draw_question(env)?;
            extra.deadline_ms = Some(env.now_ms.saturating_add(env.config.extra_question_window_ms));
            session.question = extra;
            session.player.effects.add(skill.effect().fresh());
            session.log.push("A timed question is fired at you!");
        }
        MonsterSkill::SyntaxCollapse
        | MonsterSkill::SemanticDrain
        | MonsterSkill::AmnesiaBlast
        | MonsterSkill::SyllableScramble
        | MonsterSkill::LexicalBlindness => {
            session.player.effects.add(skill.effect().fresh());
        }
    }
    Ok(())
}

const SKILL_CONTEXT: u32 = 0x5c;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_has_a_distinct_skill() {
        use strum::IntoEnumIterator;
        let skills: std::collections::HashSet<ClassSkill> =
            CharacterClass::iter().map(ClassSkill::of).collect();
        assert_eq!(skills.len(), 6);
    }

    #[test]
    fn malak_rotates_variants() {
        assert_eq!(
            MonsterSkill::for_monster(MonsterKind::Malak, 0),
            MonsterSkill::AmnesiaBlast
        );
        assert_eq!(
            MonsterSkill::for_monster(MonsterKind::Malak, 4),
            MonsterSkill::SyllableScramble
        );
        assert_eq!(
            MonsterSkill::for_monster(MonsterKind::Malak, 5),
            MonsterSkill::LexicalBlindness
        );
        assert_eq!(
            MonsterSkill::for_monster(MonsterKind::ErrantImp, 2),
            MonsterSkill::SingularStrike
        );
    }

    #[test]
    fn profiles_match_tuning_table() {
        let drain = MonsterSkill::SemanticDrain.profile();
        assert_eq!((drain.effect, drain.magnitude, drain.duration), (EffectKind::Corruption, 10, 3));
        let strike = MonsterSkill::SingularStrike.profile();
        assert_eq!((strike.effect, strike.magnitude, strike.duration), (EffectKind::DamageBuff, 50, 2));
        assert!(MonsterSkill::SyntaxCollapse.profile().attacks);
    }

    #[test]
    fn monster_action_roll_is_uniform_over_three() {
        assert_eq!(MonsterAction::from_roll(MonsterKind::DementedZombie, 3, 0), MonsterAction::Attack);
        assert_eq!(MonsterAction::from_roll(MonsterKind::DementedZombie, 4, 0), MonsterAction::Defend);
        assert_eq!(
            MonsterAction::from_roll(MonsterKind::DementedZombie, 5, 0),
            MonsterAction::Skill(MonsterSkill::Ignorance)
        );
    }
}
