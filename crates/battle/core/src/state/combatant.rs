//! Combatant state for both sides of an encounter.
//!
//! The player and the monster share the same building blocks: clamped
//! resource meters, a defending posture, and an owned [`EffectSet`]. Identity
//! enums ([`CharacterClass`], [`MonsterKind`]) drive the lookup tables in
//! [`crate::combat`].

use super::{AttackStreak, CharacterId, EffectSet, MonsterId};
use crate::config::BattleConfig;

/// A value clamped to `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a full meter.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    #[inline]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    #[inline]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Adds up to `amount`, capped at the maximum. Returns the amount gained.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current - before
    }

    /// Removes up to `amount`, floored at zero. Returns the amount lost.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        before - self.current
    }

    /// Removes exactly `amount` if available.
    pub fn spend(&mut self, amount: u32) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }
}

/// Offensive and defensive attributes of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub intelligence: u32,
    pub defense: u32,
}

/// Attribute a class uses as its base damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PrimaryStat {
    Strength,
    Intelligence,
}

/// Character class. Parsing accepts the English names and the legacy
/// localized aliases stored in older character records.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(ascii_case_insensitive)]
pub enum CharacterClass {
    #[strum(to_string = "paladin", serialize = "paladino")]
    Paladin,
    #[strum(to_string = "tank")]
    Tank,
    #[strum(to_string = "fighter", serialize = "lutador", serialize = "guerreiro")]
    Fighter,
    #[strum(to_string = "mage", serialize = "mago")]
    Mage,
    #[strum(to_string = "rogue", serialize = "ladino")]
    Rogue,
    #[strum(to_string = "bard", serialize = "bardo")]
    Bard,
}

impl CharacterClass {
    pub const fn primary_stat(self) -> PrimaryStat {
        match self {
            Self::Paladin | Self::Tank | Self::Fighter | Self::Rogue => PrimaryStat::Strength,
            Self::Mage | Self::Bard => PrimaryStat::Intelligence,
        }
    }
}

/// Monster identity. Catalog entries are matched by name fragments so both
/// English and localized catalog names resolve.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MonsterKind {
    ErrantImp,
    InquiringHarpy,
    DementedZombie,
    SyntaxSkeleton,
    QuestioningCentaur,
    Lexicographer,
    Malak,
}

impl MonsterKind {
    const NAME_FRAGMENTS: [(&'static str, MonsterKind); 14] = [
        ("diabrete", MonsterKind::ErrantImp),
        ("imp", MonsterKind::ErrantImp),
        ("harpia", MonsterKind::InquiringHarpy),
        ("harpy", MonsterKind::InquiringHarpy),
        ("zumbi", MonsterKind::DementedZombie),
        ("zombie", MonsterKind::DementedZombie),
        ("esqueleto", MonsterKind::SyntaxSkeleton),
        ("skeleton", MonsterKind::SyntaxSkeleton),
        ("centauro", MonsterKind::QuestioningCentaur),
        ("centaur", MonsterKind::QuestioningCentaur),
        ("lexicografo", MonsterKind::Lexicographer),
        ("lexicógrafo", MonsterKind::Lexicographer),
        ("lexicographer", MonsterKind::Lexicographer),
        ("malak", MonsterKind::Malak),
    ];

    /// Resolves a monster identity from a display name such as
    /// `"Diabrete Errante"` or `"Syntax Skeleton"`. Fragments match whole
    /// words only.
    pub fn identify(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        Self::NAME_FRAGMENTS
            .iter()
            .find(|(fragment, _)| words.contains(fragment))
            .map(|(_, kind)| *kind)
    }
}

/// The player's side of the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub character_id: CharacterId,
    pub name: String,
    pub class: CharacterClass,
    pub hp: ResourceMeter,
    pub energy: ResourceMeter,
    pub attributes: Attributes,
    pub level: u32,
    pub xp: u32,
    /// Set by defend or block; cleared at the end of each monster resolution.
    pub defending: bool,
    pub effects: EffectSet,
}

impl PlayerState {
    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.effects.has(super::EffectKind::Stun)
    }
}

/// The monster's side of the encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub id: MonsterId,
    pub kind: MonsterKind,
    pub name: String,
    pub hp: ResourceMeter,
    pub damage: u32,
    pub defense: u32,
    pub defending: bool,
    pub effects: EffectSet,
    /// Forced attacks promised by a buff; see [`AttackStreak`].
    pub streak: Option<AttackStreak>,
}

/// Persistent character data a battle is started from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterProfile {
    pub id: CharacterId,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub xp: u32,
    pub max_hp: u32,
    /// Falls back to [`crate::EnergyConfig::default_max`] when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_energy: Option<u32>,
    pub attributes: Attributes,
}

impl CharacterProfile {
    /// Builds a combatant at full hp and energy.
    pub fn to_player_state(&self, config: &BattleConfig) -> PlayerState {
        let max_energy = self.max_energy.unwrap_or(config.energy.default_max);
        PlayerState {
            character_id: self.id,
            name: self.name.clone(),
            class: self.class,
            hp: ResourceMeter::full(self.max_hp),
            energy: ResourceMeter::full(max_energy),
            attributes: self.attributes,
            level: self.level,
            xp: self.xp,
            defending: false,
            effects: EffectSet::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn meter_clamps_both_directions() {
        let mut meter = ResourceMeter::full(10);
        assert_eq!(meter.drain(15), 10);
        assert!(meter.is_depleted());
        assert_eq!(meter.restore(25), 10);
        assert_eq!(meter.current(), 10);
        assert!(!meter.spend(11));
        assert!(meter.spend(4));
        assert_eq!(meter.current(), 6);
    }

    #[test]
    fn class_parses_aliases_case_insensitively() {
        assert_eq!(CharacterClass::from_str("Paladino"), Ok(CharacterClass::Paladin));
        assert_eq!(CharacterClass::from_str("GUERREIRO"), Ok(CharacterClass::Fighter));
        assert_eq!(CharacterClass::from_str("lutador"), Ok(CharacterClass::Fighter));
        assert_eq!(CharacterClass::from_str("bard"), Ok(CharacterClass::Bard));
        assert!(CharacterClass::from_str("necromancer").is_err());
        assert_eq!(CharacterClass::Mage.to_string(), "mage");
    }

    #[test]
    fn class_stat_table() {
        assert_eq!(CharacterClass::Tank.primary_stat(), PrimaryStat::Strength);
        assert_eq!(CharacterClass::Bard.primary_stat(), PrimaryStat::Intelligence);
        assert_eq!(CharacterClass::Mage.primary_stat(), PrimaryStat::Intelligence);
    }

    #[test]
    fn monsters_identified_by_name_fragment() {
        assert_eq!(
            MonsterKind::identify("Diabrete Errante"),
            Some(MonsterKind::ErrantImp)
        );
        assert_eq!(
            MonsterKind::identify("Centauro Questionador"),
            Some(MonsterKind::QuestioningCentaur)
        );
        assert_eq!(
            MonsterKind::identify("The Lexicographer"),
            Some(MonsterKind::Lexicographer)
        );
        assert_eq!(
            MonsterKind::identify("Malak, Devourer of Words"),
            Some(MonsterKind::Malak)
        );
        assert_eq!(MonsterKind::identify("Slime"), None);
    }

    #[test]
    fn name_fragments_match_whole_words() {
        assert_eq!(
            MonsterKind::identify("Simple Skeleton"),
            Some(MonsterKind::SyntaxSkeleton)
        );
        assert_eq!(
            MonsterKind::identify("Impaler Zombie"),
            Some(MonsterKind::DementedZombie)
        );
        assert_eq!(MonsterKind::identify("Imperial Guard"), None);
    }
}
