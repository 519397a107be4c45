//! Inventory overlay for the skill-assignment screen.
//!
//! While the assignment screen is open the player's real item bar is
//! backed up and repainted with skill indicators; closing the screen
//! (normally or by force) restores the backup exactly. Invariant: a
//! backup exists for a player iff the assignment screen is open for
//! that player.

use hashbrown::HashMap;

use crate::cast::Effect;
use crate::consts::HOTBAR_SLOTS;
use crate::ids::{PlayerId, SkillId};
use crate::player::data::PlayerStore;
use crate::player::item::Item;
use crate::player::skills::SkillRegistry;
use crate::world::settings::Settings;

/// Screens the overlay reacts to. Hosts pass `Other` for anything that
/// is not the skill-assignment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SkillAssignment,
    Other,
}

/// Contents of the skill-assignment screen, resolved by the host GUI
#[derive(Debug, Clone, Default)]
pub struct AssignScreen {
    slots: HashMap<usize, SkillId>,
}

impl AssignScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: usize, skill: SkillId) {
        self.slots.insert(slot, skill);
    }

    pub fn skill_at(&self, slot: usize) -> Option<&SkillId> {
        self.slots.get(&slot)
    }
}

/// Where a click landed while the assignment screen was open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A slot in the assignment screen's own grid
    Screen(usize),
    /// A slot in the player's own quick-bar
    Quickbar(usize),
}

/// How the slot was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Number-key shortcut; the button is the hotbar slot it maps to
    NumberKey { hotbar_button: usize },
    Other,
}

/// Sparse snapshot of a player's real item bar
#[derive(Debug, Clone, Default)]
struct OverlayBackup {
    slots: [Option<Item>; HOTBAR_SLOTS],
}

/// Backs up, repaints, and restores item bars around the assignment
/// screen's lifetime
#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    backups: HashMap<PlayerId, OverlayBackup>,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the assignment screen is currently open for the player
    pub fn is_open(&self, player: PlayerId) -> bool {
        self.backups.contains_key(&player)
    }

    /// Players with an open assignment screen, sorted
    pub fn open_players(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self.backups.keys().copied().collect();
        players.sort_unstable();
        players
    }

    /// Screen-open hook. Snapshots the real item bar, then repaints it
    /// with skill indicators. A stale backup is overwritten.
    pub fn on_open(
        &mut self,
        players: &mut PlayerStore,
        registry: &SkillRegistry,
        settings: &Settings,
        id: PlayerId,
        screen: Screen,
    ) {
        if screen != Screen::SkillAssignment {
            return;
        }
        let Some(player) = players.get(id) else {
            return;
        };
        if !settings.world_enabled(player.world) {
            return;
        }

        let mut backup = OverlayBackup::default();
        for (slot, item) in player.hotbar.iter().enumerate() {
            if let Some(item) = item {
                if !item.cast_marker {
                    backup.slots[slot] = Some(item.clone());
                }
            }
        }
        self.backups.insert(id, backup);

        self.render(players, registry, settings, id);
    }

    /// Paint the player's real item bar with the current assignments:
    /// a marked indicator per assigned skill, the unassigned placeholder
    /// elsewhere, and the reserved menu-trigger slot always empty.
    pub fn render(
        &self,
        players: &mut PlayerStore,
        registry: &SkillRegistry,
        settings: &Settings,
        id: PlayerId,
    ) {
        let Some(player) = players.get_mut(id) else {
            return;
        };
        let unassigned = settings.unassigned.marked();
        for slot in 0..HOTBAR_SLOTS {
            if slot == settings.cast_slot {
                player.hotbar[slot] = None;
                continue;
            }
            let item = player
                .cast_profile
                .skill_at(slot)
                .and_then(|skill_id| registry.get(skill_id))
                .map(|skill| skill.indicator_item())
                .unwrap_or_else(|| unassigned.clone());
            player.hotbar[slot] = Some(item);
        }
    }

    /// Click hook for the time the assignment screen is open.
    ///
    /// A number-key press on a screen slot that resolves to a skill
    /// binds that skill to the pressed hotbar button; a quick-bar click
    /// clears that slot's assignment. Both repaint and suppress the
    /// click's default item movement. Everything else is left alone.
    pub fn on_click(
        &mut self,
        players: &mut PlayerStore,
        registry: &SkillRegistry,
        settings: &Settings,
        id: PlayerId,
        screen: &AssignScreen,
        target: ClickTarget,
        kind: ClickKind,
    ) -> Vec<Effect> {
        if !self.is_open(id) {
            return Vec::new();
        }
        let Some(player) = players.get(id) else {
            return Vec::new();
        };
        if !settings.world_enabled(player.world) {
            return Vec::new();
        }

        match (target, kind) {
            (ClickTarget::Screen(slot), ClickKind::NumberKey { hotbar_button }) => {
                let Some(skill) = screen.skill_at(slot).cloned() else {
                    return Vec::new();
                };
                let assigned = players.get_mut(id).is_some_and(|player| {
                    player
                        .cast_profile
                        .assign(hotbar_button, Some(skill), settings.cast_slot)
                        .is_ok()
                });
                if assigned {
                    self.render(players, registry, settings, id);
                }
                vec![Effect::SuppressInput]
            }
            (ClickTarget::Quickbar(slot), _) => {
                let cleared = players.get_mut(id).is_some_and(|player| {
                    player
                        .cast_profile
                        .assign(slot, None, settings.cast_slot)
                        .is_ok()
                });
                if cleared {
                    self.render(players, registry, settings, id);
                }
                vec![Effect::SuppressInput]
            }
            _ => Vec::new(),
        }
    }

    /// Screen-close hook. Restores the real item bar from the backup.
    pub fn on_close(&mut self, players: &mut PlayerStore, id: PlayerId, screen: Screen) {
        if screen != Screen::SkillAssignment {
            return;
        }
        self.restore(players, id);
    }

    /// Put the real item bar back exactly as it was at open time,
    /// previously-empty slots included, and drop the backup.
    pub fn restore(&mut self, players: &mut PlayerStore, id: PlayerId) {
        let Some(backup) = self.backups.remove(&id) else {
            return;
        };
        tracing::debug!(player = %id, "overlay restored");
        if let Some(player) = players.get_mut(id) {
            player.hotbar = backup.slots;
        }
    }
}
