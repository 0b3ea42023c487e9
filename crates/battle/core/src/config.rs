/// Battle configuration constants and tunable parameters.
///
/// Every field has a default matching the shipped balance, so partial TOML
/// files only need to name the values they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattleConfig {
    pub costs: ActionCosts,
    pub energy: EnergyConfig,
    pub rewards: RewardConfig,
    pub skills: SkillTuning,
    pub mitigation: MitigationConfig,
    pub leveling: LevelingConfig,
    /// Answer window attached to a question issued by an extra-question effect.
    pub extra_question_window_ms: u64,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneous effects tracked per combatant.
    pub const MAX_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_EXTRA_QUESTION_WINDOW_MS: u64 = 15_000;

    pub fn new() -> Self {
        Self {
            costs: ActionCosts::default(),
            energy: EnergyConfig::default(),
            rewards: RewardConfig::default(),
            skills: SkillTuning::default(),
            mitigation: MitigationConfig::default(),
            leveling: LevelingConfig::default(),
            extra_question_window_ms: Self::DEFAULT_EXTRA_QUESTION_WINDOW_MS,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Energy cost of each player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ActionCosts {
    pub attack: u32,
    pub defend: u32,
    pub skill: u32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            attack: 2,
            defend: 1,
            skill: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct EnergyConfig {
    /// Energy restored by a correct answer (unless recovery is blocked).
    pub recovery_per_correct_answer: u32,
    /// Maximum energy used when a character profile does not carry one.
    pub default_max: u32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            recovery_per_correct_answer: 1,
            default_max: 12,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RewardConfig {
    pub xp_win: u32,
    pub gold_win: u32,
    /// Reward multiplier for winning through the bard challenge.
    pub challenge_multiplier: u32,
    /// Hit points lost when the bard challenge is answered wrong.
    pub challenge_failure_penalty: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            xp_win: 50,
            gold_win: 20,
            challenge_multiplier: 2,
            challenge_failure_penalty: 30,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SkillTuning {
    pub heal_amount: u32,
    /// Charge amplification (percent of base) against an open monster.
    pub charge_open_percent: u32,
    /// Charge amplification (percent of base) against a defending monster.
    pub charge_guarded_percent: u32,
}

impl Default for SkillTuning {
    fn default() -> Self {
        Self {
            heal_amount: 10,
            charge_open_percent: 125,
            charge_guarded_percent: 115,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MitigationConfig {
    /// Upper bound for the defense-derived reduction percentage.
    pub max_reduction_percent: u32,
    /// Percentage of damage that still lands on an actively defending target.
    pub guard_percent: u32,
}

impl Default for MitigationConfig {
    fn default() -> Self {
        Self {
            max_reduction_percent: 90,
            guard_percent: 50,
        }
    }
}

/// Level curve: `xp_needed(level) = floor(base_xp * level ^ exponent)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LevelingConfig {
    pub base_xp: u32,
    pub exponent: f64,
}

impl LevelingConfig {
    /// Experience required to advance past `level`.
    pub fn xp_for_next_level(&self, level: u32) -> u32 {
        let needed = f64::from(self.base_xp) * f64::from(level.max(1)).powf(self.exponent);
        needed.floor() as u32
    }
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            base_xp: 100,
            exponent: 1.5,
        }
    }
}
