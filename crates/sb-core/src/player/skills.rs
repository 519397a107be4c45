//! Skill definitions and the skill registry

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::SkillId;
use crate::player::item::Item;

/// A skill definition as known to the player-data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub mana_cost: u32,
    pub icon: char,
}

impl Skill {
    pub fn new(name: &str, mana_cost: u32, icon: char) -> Self {
        Self {
            id: SkillId::from(name),
            name: name.to_owned(),
            mana_cost,
            icon,
        }
    }

    /// Text indicator for this skill.
    ///
    /// Brief mode is the name alone; full mode appends the mana cost.
    pub fn indicator(&self, brief: bool) -> String {
        if brief {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.mana_cost)
        }
    }

    /// Item shown in an overlay slot for this skill
    pub fn indicator_item(&self) -> Item {
        Item::new(self.name.clone(), self.icon).marked()
    }
}

/// Keyed table of skill definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRegistry {
    skills: HashMap<SkillId, Skill>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one with the same id
    pub fn register(&mut self, skill: Skill) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
