//! Cast output channels

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Output surface used to display the armed-skill line.
///
/// Fixed at subsystem configuration time and shared by all sessions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum CastChannel {
    /// Repeating heads-up overlay line
    #[default]
    Overlay,
    /// Repeating title line
    Title,
    /// Repeating subtitle line
    Subtitle,
    /// One-shot chat message
    Message,
}

impl CastChannel {
    /// Visual channels repeat through a broadcaster; Message emits once
    /// and never holds a session open.
    pub const fn is_visual(&self) -> bool {
        !matches!(self, CastChannel::Message)
    }
}
