//! Repeating broadcast tasks for visual cast channels.
//!
//! One task per casting session. The host drives the dispatcher's tick
//! once per scheduling quantum; every live task re-evaluates its exit
//! conditions first, then re-renders and emits. Stopping is idempotent
//! from both the tick path and an external toggle, and the Overlay
//! channel emits a single empty line on stop so the display does not
//! linger.

use hashbrown::HashMap;
use strum::Display;

use crate::cast::channel::CastChannel;
use crate::cast::{ChannelOutput, Effect};
use crate::ids::PlayerId;

/// Why a broadcast task stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StopReason {
    /// Player toggled casting off
    Toggled,
    /// Subsystem disabled
    Disabled,
    /// Player disconnected
    Offline,
    /// Player's world is not eligible
    WorldDisabled,
    /// Profile lost its last assignment
    EmptyProfile,
}

/// A live repeating emission
#[derive(Debug, Clone, Copy, Default)]
struct BroadcastTask {
    /// Emissions so far, diagnostics only
    emissions: u64,
}

/// Registry of live broadcast tasks, keyed by player identity
#[derive(Debug, Clone, Default)]
pub struct Broadcaster {
    tasks: HashMap<PlayerId, BroadcastTask>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task for the player. Starting an already-running task
    /// keeps the existing entry.
    pub fn start(&mut self, player: PlayerId) {
        self.tasks.entry(player).or_default();
    }

    pub fn is_running(&self, player: PlayerId) -> bool {
        self.tasks.contains_key(&player)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }

    /// Players with a live task, sorted for deterministic tick order
    pub fn active_players(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self.tasks.keys().copied().collect();
        players.sort_unstable();
        players
    }

    pub fn note_emission(&mut self, player: PlayerId) {
        if let Some(task) = self.tasks.get_mut(&player) {
            task.emissions += 1;
        }
    }

    /// Stop the player's task.
    ///
    /// Safe to call from both the tick path and an external toggle: the
    /// second call finds no task and does nothing, so the clear-signal
    /// is emitted at most once per started session.
    pub fn stop(
        &mut self,
        player: PlayerId,
        channel: CastChannel,
        reason: StopReason,
        effects: &mut Vec<Effect>,
    ) {
        let Some(task) = self.tasks.remove(&player) else {
            return;
        };
        tracing::debug!(
            player = %player,
            reason = %reason,
            emissions = task.emissions,
            "broadcast stopped"
        );
        if channel == CastChannel::Overlay {
            effects.push(Effect::Emit(player, ChannelOutput::Overlay(String::new())));
        }
    }
}
