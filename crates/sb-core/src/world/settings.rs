//! Subsystem configuration.
//!
//! Loaded by the host from its own config layer; this crate only defines
//! the shape and the defaults.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::cast::channel::CastChannel;
use crate::cast::template::DEFAULT_TEMPLATE;
use crate::consts::DEFAULT_CAST_SLOT;
use crate::ids::WorldId;
use crate::player::item::Item;

/// Which worlds the skill system is active in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldPolicy {
    /// Active everywhere
    #[default]
    All,
    /// Active only in the listed worlds
    Only(HashSet<WorldId>),
}

impl WorldPolicy {
    pub fn allows(&self, world: WorldId) -> bool {
        match self {
            WorldPolicy::All => true,
            WorldPolicy::Only(worlds) => worlds.contains(&world),
        }
    }
}

/// Configuration for the casting subsystem, fixed at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Output surface for cast messages
    pub channel: CastChannel,
    /// Hotbar slot reserved as the cast menu trigger
    pub cast_slot: usize,
    /// Placeholder item rendered into unassigned overlay slots
    pub unassigned: Item,
    /// Message template, see [`crate::cast::template`] for placeholders
    pub template: String,
    pub worlds: WorldPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channel: CastChannel::Overlay,
            cast_slot: DEFAULT_CAST_SLOT,
            unassigned: Item::new("Unassigned", '_'),
            template: DEFAULT_TEMPLATE.to_owned(),
            worlds: WorldPolicy::All,
        }
    }
}

impl Settings {
    pub fn world_enabled(&self, world: WorldId) -> bool {
        self.worlds.allows(world)
    }
}
