//! Character roster loader.
//!
//! Classes are written as plain strings so legacy localized names such as
//! `"paladino"` load unchanged.

use std::path::Path;

use battle_core::{Attributes, CharacterClass, CharacterId, CharacterProfile};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Clone, Debug, Deserialize)]
pub struct CharacterSpec {
    pub id: u64,
    pub name: String,
    pub class: String,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub xp: u32,
    pub max_hp: u32,
    #[serde(default)]
    pub max_energy: Option<u32>,
    pub attributes: Attributes,
}

fn first_level() -> u32 {
    1
}

/// Loader for character profiles from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterProfile>> {
        let specs: Vec<CharacterSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character roster RON: {}", e))?;

        specs
            .into_iter()
            .map(|spec| {
                let class: CharacterClass = spec.class.parse().map_err(|_| {
                    anyhow::anyhow!(
                        "Failed to resolve class '{}' for character '{}': unknown class",
                        spec.class,
                        spec.name
                    )
                })?;
                Ok(CharacterProfile {
                    id: CharacterId(spec.id),
                    name: spec.name,
                    class,
                    level: spec.level.max(1),
                    xp: spec.xp,
                    max_hp: spec.max_hp,
                    max_energy: spec.max_energy,
                    attributes: spec.attributes,
                })
            })
            .collect()
    }
}
