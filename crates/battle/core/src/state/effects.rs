//! Temporal effect system.
//!
//! Effects are timed modifiers attached to exactly one side. They are counted
//! in monster resolutions rather than wall time: every resolution ticks each
//! side once, decrementing `remaining` and purging effects that reach zero.
//!
//! # Fresh effects
//!
//! An effect applied *during* a resolution is marked `fresh` and skips that
//! resolution's tick, so a one-turn stun applied by the monster actually lasts
//! through the player's next turn.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Closed set of effect types.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    // ========================================================================
    // Combat modifiers
    // ========================================================================
    /// Outgoing damage increased by `magnitude` percent.
    DamageBuff,

    /// Incoming damage reduced by `magnitude` percent; consumed by the first
    /// blow it mitigates.
    DamageReduction,

    // ========================================================================
    // Action restrictions
    // ========================================================================
    /// Only skipping the turn is allowed.
    Stun,

    /// Skill action rejected.
    DisableSkill,

    /// Correct answers restore no energy.
    BlockEnergyRecovery,

    /// Wrong answers drain `magnitude` hp.
    Corruption,

    // ========================================================================
    // Question presentation
    // ========================================================================
    ScrambleQuestion,
    ExtraQuestion,
    HideQuestion,
}

/// Which combatant an effect is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Monster,
}

/// A single timed effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    pub magnitude: u32,
    /// Monster resolutions left before the effect is purged.
    pub remaining: u32,
    pub description: String,
    /// Skips the next tick; see module docs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fresh: bool,
}

impl Effect {
    pub fn new(kind: EffectKind, magnitude: u32, remaining: u32, description: impl Into<String>) -> Self {
        Self {
            kind,
            magnitude,
            remaining,
            description: description.into(),
            fresh: false,
        }
    }

    /// Marks the effect as applied mid-resolution.
    #[must_use]
    pub fn fresh(mut self) -> Self {
        self.fresh = true;
        self
    }
}

/// A damage buff that lasts for a number of forced monster attacks instead of
/// a number of resolutions.
///
/// The buff and its counter live in one value so they cannot drift apart: the
/// tick never touches it and it disappears with its last promised attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackStreak {
    pub buff: Effect,
    pub attacks_remaining: u32,
}

impl AttackStreak {
    pub fn new(buff: Effect, attacks_remaining: u32) -> Self {
        Self {
            buff,
            attacks_remaining,
        }
    }

    /// Consumes one forced attack. Returns `false` once the streak is spent.
    pub fn consume_attack(&mut self) -> bool {
        self.attacks_remaining = self.attacks_remaining.saturating_sub(1);
        self.attacks_remaining > 0
    }
}

/// Active effects on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSet {
    effects: ArrayVec<Effect, { BattleConfig::MAX_EFFECTS }>,
}

impl EffectSet {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds an effect. Effects of the same kind stack as separate entries.
    ///
    /// Returns `false` when the effect was dropped because it has no duration
    /// or the set is at capacity.
    pub fn add(&mut self, effect: Effect) -> bool {
        if effect.remaining == 0 || self.effects.is_full() {
            return false;
        }
        self.effects.push(effect);
        true
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Sum of magnitudes across every active effect of `kind`.
    pub fn magnitude(&self, kind: EffectKind) -> u32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .fold(0u32, |acc, e| acc.saturating_add(e.magnitude))
    }

    /// Removes every effect of `kind`. Returns how many were removed.
    pub fn remove(&mut self, kind: EffectKind) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        before - self.effects.len()
    }

    /// Advances every effect by one resolution and purges expired ones.
    pub fn tick(&mut self) {
        for effect in self.effects.iter_mut() {
            if effect.fresh {
                effect.fresh = false;
            } else {
                effect.remaining = effect.remaining.saturating_sub(1);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stun(duration: u32) -> Effect {
        Effect::new(EffectKind::Stun, 0, duration, "stunned")
    }

    #[test]
    fn tick_decrements_and_purges() {
        let mut set = EffectSet::empty();
        set.add(stun(1));
        set.add(Effect::new(EffectKind::Corruption, 10, 3, "drain"));

        set.tick();
        assert!(!set.has(EffectKind::Stun));
        assert!(set.has(EffectKind::Corruption));
        assert_eq!(set.iter().next().map(|e| e.remaining), Some(2));
    }

    #[test]
    fn fresh_effect_survives_first_tick() {
        let mut set = EffectSet::empty();
        set.add(stun(1).fresh());

        set.tick();
        assert!(set.has(EffectKind::Stun));
        set.tick();
        assert!(!set.has(EffectKind::Stun));
    }

    #[test]
    fn magnitudes_stack() {
        let mut set = EffectSet::empty();
        set.add(Effect::new(EffectKind::Corruption, 10, 3, "a"));
        set.add(Effect::new(EffectKind::Corruption, 5, 1, "b"));
        assert_eq!(set.magnitude(EffectKind::Corruption), 15);
        assert_eq!(set.remove(EffectKind::Corruption), 2);
        assert!(set.is_empty());
    }

    #[test]
    fn zero_duration_and_overflow_are_dropped() {
        let mut set = EffectSet::empty();
        assert!(!set.add(stun(0)));
        for _ in 0..BattleConfig::MAX_EFFECTS {
            assert!(set.add(stun(2)));
        }
        assert!(!set.add(stun(2)));
        assert_eq!(set.len(), BattleConfig::MAX_EFFECTS);
    }

    #[test]
    fn streak_ends_with_last_attack() {
        let buff = Effect::new(EffectKind::DamageBuff, 50, 1, "buff");
        let mut streak = AttackStreak::new(buff, 2);
        assert!(streak.consume_attack());
        assert!(!streak.consume_attack());
    }

    proptest! {
        #[test]
        fn remaining_never_increases(durations in proptest::collection::vec((1u32..6, any::<bool>()), 1..10)) {
            let mut set = EffectSet::empty();
            for (duration, fresh) in &durations {
                let effect = Effect::new(EffectKind::Corruption, 1, *duration, "p");
                set.add(if *fresh { effect.fresh() } else { effect });
            }
            for _ in 0..8 {
                let before: Vec<u32> = set.iter().map(|e| e.remaining).collect();
                set.tick();
                let after: Vec<u32> = set.iter().map(|e| e.remaining).collect();
                prop_assert!(after.len() <= before.len());
                prop_assert!(after.iter().all(|r| *r > 0));
                prop_assert!(after.iter().max() <= before.iter().max());
            }
        }
    }
}
