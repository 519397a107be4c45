//! Player records and the in-process player store.
//!
//! Stand-in for the host's player-data store. It carries the persistent
//! cast profile plus the live fields message templates read; the casting
//! subsystem never assumes exclusive ownership of any of it.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::cast::profile::CastProfile;
use crate::consts::HOTBAR_SLOTS;
use crate::ids::{PlayerId, SkillId, WorldId};
use crate::player::item::Item;

/// One player's record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerData {
    pub id: PlayerId,
    pub name: String,
    pub world: WorldId,
    pub online: bool,
    pub level: u32,
    pub mana: u32,
    pub max_mana: u32,
    /// Skills the player currently has unlocked
    pub unlocked: HashSet<SkillId>,
    /// Real item bar contents
    pub hotbar: [Option<Item>; HOTBAR_SLOTS],
    /// Currently held hotbar slot
    pub active_slot: usize,
    pub cast_profile: CastProfile,
}

impl PlayerData {
    pub fn new(id: PlayerId, name: impl Into<String>, world: WorldId) -> Self {
        Self {
            id,
            name: name.into(),
            world,
            online: true,
            level: 1,
            mana: 100,
            max_mana: 100,
            unlocked: HashSet::new(),
            hotbar: Default::default(),
            active_slot: 0,
            cast_profile: CastProfile::new(),
        }
    }

    pub fn unlock(&mut self, skill: impl Into<SkillId>) {
        self.unlocked.insert(skill.into());
    }

    pub fn has_skill(&self, id: &SkillId) -> bool {
        self.unlocked.contains(id)
    }
}

/// All tracked player records, keyed by player identity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStore {
    players: HashMap<PlayerId, PlayerData>,
}

impl PlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    pub fn insert(&mut self, player: PlayerData) {
        self.players.insert(player.id, player);
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerData> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerData> {
        self.players.get_mut(&id)
    }

    pub fn remove(&mut self, id: PlayerId) -> Option<PlayerData> {
        self.players.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerData> {
        self.players.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlayerData> {
        self.players.values_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_tracking() {
        let mut player = PlayerData::new(PlayerId(1), "Aria", WorldId(0));
        assert!(!player.has_skill(&SkillId::from("Fireball")));

        player.unlock("Fireball");
        assert!(player.has_skill(&SkillId::from("Fireball")));
    }

    #[test]
    fn test_store_insert_replaces() {
        let mut store = PlayerStore::new();
        store.insert(PlayerData::new(PlayerId(1), "Aria", WorldId(0)));

        let mut updated = PlayerData::new(PlayerId(1), "Aria", WorldId(0));
        updated.level = 10;
        store.insert(updated);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(PlayerId(1)).map(|p| p.level), Some(10));
    }
}
