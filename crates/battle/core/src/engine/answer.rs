//! Answer handling for ordinary questions and the bard challenge.

use super::{BattleEvent, resolution, validation};
use crate::env::BattleEnv;
use crate::error::BattleError;
use crate::state::{BattlePhase, BattleSession, EffectKind, QuestionId};

pub(super) fn validate(
    session: &BattleSession,
    question_id: QuestionId,
) -> Result<(), BattleError> {
    validation::ensure_active(session)?;
    match session.phase {
        BattlePhase::AwaitingChallengeAnswer => {}
        _ => validation::ensure_player_can_act(session)?,
    }
    if session.question.id != question_id {
        return Err(BattleError::QuestionMismatch {
            expected: session.question.id,
            provided: question_id,
        });
    }
    Ok(())
}

pub(super) fn apply(
    session: &mut BattleSession,
    answer: &str,
    env: &BattleEnv<'_>,
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let in_time = !session.question.is_expired(env.now_ms);
    let correct = in_time && session.question.accepts(answer);

    if session.phase == BattlePhase::AwaitingChallengeAnswer {
        // The challenge answer ends the battle either way.
        events.push(BattleEvent::QuestionAnswered { correct });
        if correct {
            session.log.push("Your silver tongue leaves the monster speechless!");
            resolution::declare_victory(session, env, true, events);
        } else {
            let penalty = env.config.rewards.challenge_failure_penalty;
            let lost = session.player.hp.drain(penalty);
            session.log.damage_taken = session.log.damage_taken.saturating_add(lost);
            session
                .log
                .push(format!("The challenge backfires! You lose {lost} hp."));
            resolution::declare_defeat(session, events);
        }
        return Ok(());
    }

    // Draw before resolving so monster question effects land on the new card.
    let next = session.draw_question(env)?;
    events.push(BattleEvent::QuestionAnswered { correct });

    if correct {
        if session.player.effects.has(EffectKind::BlockEnergyRecovery) {
            session
                .log
                .push("Correct! But your energy recovery is blocked.");
        } else {
            let gained = session
                .player
                .energy
                .restore(env.config.energy.recovery_per_correct_answer);
            session
                .log
                .push(format!("Correct! You recover {gained} energy."));
        }
        session.question = next;
        return Ok(());
    }

    if in_time {
        session.log.push("Wrong answer! You lose the turn.");
    } else {
        session.log.push("Too slow! The answer window has closed.");
    }
    let corruption = session.player.effects.magnitude(EffectKind::Corruption);
    if corruption > 0 {
        let drained = session.player.hp.drain(corruption);
        session.log.damage_taken = session.log.damage_taken.saturating_add(drained);
        session
            .log
            .push(format!("Corruption drains {drained} hp."));
    }
    session.question = next;
    resolution::run(session, env, events)
}
