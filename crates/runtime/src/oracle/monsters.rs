//! Monster oracle implementing [`battle_core::MonsterOracle`].

use battle_core::{MonsterId, MonsterOracle, MonsterTemplate};

/// Oracle providing monster templates in catalog order.
#[derive(Clone, Debug, Default)]
pub struct MonsterCatalog {
    templates: Vec<MonsterTemplate>,
}

impl MonsterCatalog {
    pub fn new(templates: Vec<MonsterTemplate>) -> Self {
        Self { templates }
    }

    /// Add a template, replacing any entry with the same id.
    pub fn add(&mut self, template: MonsterTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MonsterOracle for MonsterCatalog {
    fn template(&self, id: MonsterId) -> Option<MonsterTemplate> {
        self.templates.iter().find(|t| t.id == id).cloned()
    }

    fn all(&self) -> Vec<MonsterTemplate> {
        self.templates.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::MonsterKind;

    fn template(id: u64, hp: u32) -> MonsterTemplate {
        MonsterTemplate {
            id: MonsterId(id),
            name: "Harpy".into(),
            kind: MonsterKind::InquiringHarpy,
            max_hp: hp,
            damage: 5,
            defense: 1,
        }
    }

    #[test]
    fn add_replaces_by_id() {
        let mut catalog = MonsterCatalog::default();
        catalog.add(template(1, 10));
        catalog.add(template(2, 20));
        catalog.add(template(1, 30));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.template(MonsterId(1)).map(|t| t.max_hp), Some(30));
        assert!(catalog.template(MonsterId(3)).is_none());
    }
}
