use crate::state::{MonsterId, MonsterKind};

/// Static monster definition a battle is opened against.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub id: MonsterId,
    pub name: String,
    pub kind: MonsterKind,
    pub max_hp: u32,
    pub damage: u32,
    pub defense: u32,
}

/// Read-only monster catalog.
pub trait MonsterOracle: Send + Sync {
    fn template(&self, id: MonsterId) -> Option<MonsterTemplate>;

    /// All known templates, in catalog order.
    fn all(&self) -> Vec<MonsterTemplate>;
}
