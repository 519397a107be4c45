//! Hotbar item model

use serde::{Deserialize, Serialize};

/// A single hotbar item.
///
/// Items the overlay writes into the real hotbar carry the cast marker.
/// Marked items are never treated as player-owned; backup snapshots
/// skip them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub icon: char,
    /// Set on items owned by the overlay, never on player items
    #[serde(default)]
    pub cast_marker: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, icon: char) -> Self {
        Self {
            name: name.into(),
            icon,
            cast_marker: false,
        }
    }

    /// Copy of this item flagged as overlay-owned
    pub fn marked(&self) -> Self {
        let mut item = self.clone();
        item.cast_marker = true;
        item
    }
}
