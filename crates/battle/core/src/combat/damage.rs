//! Damage and mitigation.
//!
//! All arithmetic is integer percent math on `u64` intermediates, truncating
//! toward zero. No result is ever negative.

use crate::config::{MitigationConfig, SkillTuning};
use crate::state::{EffectKind, MonsterState, PendingStrike, PlayerState, PrimaryStat};

/// `value * percent / 100`, truncated.
#[inline]
pub fn percent_of(value: u32, percent: u32) -> u32 {
    let scaled = u64::from(value) * u64::from(percent) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Base damage of a player action: the class's primary stat.
pub fn player_base_damage(player: &PlayerState) -> u32 {
    match player.class.primary_stat() {
        PrimaryStat::Strength => player.attributes.strength,
        PrimaryStat::Intelligence => player.attributes.intelligence,
    }
}

/// Monster damage before the target's mitigation, including damage buffs from
/// effects and from an active attack streak.
pub fn monster_outgoing_damage(monster: &MonsterState) -> u32 {
    let streak_buff = monster
        .streak
        .as_ref()
        .map_or(0, |streak| streak.buff.magnitude);
    let buff = monster
        .effects
        .magnitude(EffectKind::DamageBuff)
        .saturating_add(streak_buff);
    percent_of(monster.damage, 100u32.saturating_add(buff))
}

/// Applies base defense, the guard posture, and a damage-reduction effect.
///
/// * reduction from defense: `floor(defense / 2)` percent, capped
/// * defending: a further `guard_percent` multiplier
/// * reduction effect: a further `(100 - reduction_percent)` multiplier
pub fn mitigate(
    raw: u32,
    defense: u32,
    defending: bool,
    reduction_percent: u32,
    config: &MitigationConfig,
) -> u32 {
    let defense_reduction = (defense / 2).min(config.max_reduction_percent).min(100);
    let mut damage = percent_of(raw, 100 - defense_reduction);
    if defending {
        damage = percent_of(damage, config.guard_percent);
    }
    percent_of(damage, 100 - reduction_percent.min(100))
}

/// Charge amplification depends on whether the monster guarded this round.
pub fn charge_damage(base: u32, monster_defending: bool, tuning: &SkillTuning) -> u32 {
    let percent = if monster_defending {
        tuning.charge_guarded_percent
    } else {
        tuning.charge_open_percent
    };
    percent_of(base, percent)
}

/// Final damage a pending strike deals to the monster.
///
/// Ordinary strikes honour the guard posture and damage-reduction effects.
/// Charge strikes are amplified instead and only base defense applies.
pub fn strike_damage(
    strike: PendingStrike,
    monster: &MonsterState,
    mitigation: &MitigationConfig,
    tuning: &SkillTuning,
) -> u32 {
    if strike.charge {
        let amplified = charge_damage(strike.damage, monster.defending, tuning);
        return mitigate(amplified, monster.defense, false, 0, mitigation);
    }
    mitigate(
        strike.damage,
        monster.defense,
        monster.defending,
        monster.effects.magnitude(EffectKind::DamageReduction),
        mitigation,
    )
}

/// Final damage a monster attack deals to the player.
pub fn incoming_damage(
    monster: &MonsterState,
    player: &PlayerState,
    mitigation: &MitigationConfig,
) -> u32 {
    mitigate(
        monster_outgoing_damage(monster),
        player.attributes.defense,
        player.defending,
        player.effects.magnitude(EffectKind::DamageReduction),
        mitigation,
    )
}
