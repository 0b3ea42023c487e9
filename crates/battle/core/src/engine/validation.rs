//! Precondition checks shared by the transitions. None of these mutate.

use crate::error::BattleError;
use crate::state::{BattlePhase, BattleSession, EffectKind};

pub(super) fn ensure_active(session: &BattleSession) -> Result<(), BattleError> {
    if session.is_finished() {
        return Err(BattleError::BattleFinished);
    }
    Ok(())
}

pub(super) fn ensure_phase(session: &BattleSession, expected: BattlePhase) -> Result<(), BattleError> {
    ensure_active(session)?;
    if session.phase != expected {
        return Err(BattleError::WrongPhase {
            expected,
            actual: session.phase,
        });
    }
    Ok(())
}

/// Player owns the turn and is free to act.
pub(super) fn ensure_player_can_act(session: &BattleSession) -> Result<(), BattleError> {
    ensure_phase(session, BattlePhase::AwaitingPlayerAction)?;
    if session.player.is_stunned() {
        return Err(BattleError::Stunned);
    }
    Ok(())
}

pub(super) fn ensure_energy(session: &BattleSession, required: u32) -> Result<(), BattleError> {
    let available = session.player.energy.current();
    if available < required {
        return Err(BattleError::InsufficientEnergy {
            required,
            available,
        });
    }
    Ok(())
}

pub(super) fn ensure_skill_enabled(session: &BattleSession) -> Result<(), BattleError> {
    if session.player.effects.has(EffectKind::DisableSkill) {
        return Err(BattleError::SkillDisabled);
    }
    Ok(())
}
