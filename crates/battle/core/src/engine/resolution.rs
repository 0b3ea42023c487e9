//! Monster resolution and battle completion.
//!
//! A resolution runs in a fixed order:
//! 1. the monster acts (forced to attack while a streak is active)
//! 2. the pending player strike lands, exactly once
//! 3. both defending postures reset
//! 4. both effect sets tick
//! 5. completion is checked, monster death first

use super::BattleEvent;
use crate::combat::{MonsterAction, apply_monster_skill, land_monster_attack, strike_damage};
use crate::env::BattleEnv;
use crate::error::BattleError;
use crate::state::{BattleOutcome, BattlePhase, BattleSession, EffectKind, Reward};

const ACTION_CONTEXT: u32 = 0xa0;
const VARIANT_CONTEXT: u32 = 0xa1;

pub(super) fn run(
    session: &mut BattleSession,
    env: &BattleEnv<'_>,
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let action = choose_action(session, env);
    session.log.monster_action = Some(action);

    match action {
        MonsterAction::Attack => {
            land_monster_attack(session, env.config);
            let spent = session
                .monster
                .streak
                .as_mut()
                .is_some_and(|streak| !streak.consume_attack());
            if spent {
                session.monster.streak = None;
            }
        }
        MonsterAction::Defend => {
            session.monster.defending = true;
            session
                .log
                .push(format!("{} raises its guard.", session.monster.name));
        }
        MonsterAction::Skill(skill) => apply_monster_skill(session, skill, env)?,
    }

    land_pending_strike(session, env);

    session.player.defending = false;
    session.monster.defending = false;
    session.player.effects.tick();
    session.monster.effects.tick();
    session.round = session.round.saturating_add(1);

    if session.monster.hp.is_depleted() {
        declare_victory(session, env, false, events);
    } else if session.player.hp.is_depleted() {
        declare_defeat(session, events);
    } else {
        session.phase = BattlePhase::AwaitingPlayerAction;
    }
    Ok(())
}

fn choose_action(session: &mut BattleSession, env: &BattleEnv<'_>) -> MonsterAction {
    if session.monster.streak.is_some() {
        return MonsterAction::Attack;
    }
    let roll = env.rng.next_u32(session.next_seed(ACTION_CONTEXT));
    let variant = env.rng.next_u32(session.next_seed(VARIANT_CONTEXT));
    MonsterAction::from_roll(session.monster.kind, roll, variant)
}

fn land_pending_strike(session: &mut BattleSession, env: &BattleEnv<'_>) {
    let Some(strike) = session.pending.take() else {
        return;
    };
    let damage = strike_damage(
        strike,
        &session.monster,
        &env.config.mitigation,
        &env.config.skills,
    );
    if !strike.charge && strike.damage > 0 {
        session.monster.effects.remove(EffectKind::DamageReduction);
    }
    let dealt = session.monster.hp.drain(damage);
    session.log.damage_dealt = session.log.damage_dealt.saturating_add(dealt);
    session.log.push(format!(
        "Your strike lands! {} takes {dealt} damage.",
        session.monster.name
    ));
}

pub(super) fn declare_victory(
    session: &mut BattleSession,
    env: &BattleEnv<'_>,
    challenge: bool,
    events: &mut Vec<BattleEvent>,
) {
    let rewards = &env.config.rewards;
    let multiplier = if challenge {
        rewards.challenge_multiplier
    } else {
        1
    };
    let reward = Reward {
        xp: rewards.xp_win.saturating_mul(multiplier),
        gold: rewards.gold_win.saturating_mul(multiplier),
        challenge,
    };
    session.pending = None;
    session.reward = Some(reward);
    session.phase = BattlePhase::Finished(BattleOutcome::Victory);
    session.log.push(format!(
        "{} is defeated! You gain {} XP and {} gold.",
        session.monster.name, reward.xp, reward.gold
    ));
    events.push(BattleEvent::MonsterDefeated {
        monster_id: session.monster.id,
    });
    events.push(BattleEvent::BattleWon { reward });
}

pub(super) fn declare_defeat(session: &mut BattleSession, events: &mut Vec<BattleEvent>) {
    session.pending = None;
    session.phase = BattlePhase::Finished(BattleOutcome::Defeat);
    session.log.push("You have been defeated.");
    events.push(BattleEvent::BattleLost);
}
