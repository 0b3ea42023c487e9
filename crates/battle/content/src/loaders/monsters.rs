//! Monster catalog loader.
//!
//! RON format: `Vec<MonsterSpec>`. The monster identity may be given
//! explicitly with `kind`; otherwise it is resolved from the display name.

use std::collections::HashSet;
use std::path::Path;

use battle_core::{MonsterId, MonsterKind, MonsterTemplate};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Catalog entry as written in the data file.
#[derive(Clone, Debug, Deserialize)]
pub struct MonsterSpec {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub kind: Option<MonsterKind>,
    pub max_hp: u32,
    pub damage: u32,
    #[serde(default)]
    pub defense: u32,
}

impl MonsterSpec {
    fn resolve(self) -> LoadResult<MonsterTemplate> {
        let kind = match self.kind {
            Some(kind) => kind,
            None => MonsterKind::identify(&self.name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Failed to resolve monster kind for '{}' (id {}): unknown name",
                    self.name,
                    self.id
                )
            })?,
        };
        Ok(MonsterTemplate {
            id: MonsterId(self.id),
            name: self.name,
            kind,
            max_hp: self.max_hp,
            damage: self.damage,
            defense: self.defense,
        })
    }
}

/// Loader for the monster catalog from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MonsterTemplate>> {
        let specs: Vec<MonsterSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        let mut monsters = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.id) {
                anyhow::bail!("Duplicate monster id {} in catalog", spec.id);
            }
            if spec.max_hp == 0 {
                anyhow::bail!("Monster '{}' must have positive max_hp", spec.name);
            }
            monsters.push(spec.resolve()?);
        }
        Ok(monsters)
    }
}
