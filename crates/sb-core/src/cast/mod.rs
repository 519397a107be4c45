//! Text-casting subsystem.
//!
//! Lets a player bind skills to hotbar slots and cast them through a
//! non-inventory text channel while the real item bar doubles as the
//! skill-selection surface. Handlers mutate subsystem state directly but
//! never touch the host; everything the host must do comes back as
//! [`Effect`] values.

pub mod broadcast;
pub mod channel;
pub mod dispatch;
pub mod overlay;
pub mod profile;
pub mod session;
pub mod template;

use crate::ids::{PlayerId, SkillId};

/// A channel emission produced by the subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutput {
    /// Overlay line refresh; the empty string clears the line
    Overlay(String),
    /// Title/subtitle pair with tick timings
    Title {
        title: String,
        subtitle: String,
        fade_in: u32,
        stay: u32,
        fade_out: u32,
    },
    /// Plain one-shot chat line
    Message(String),
}

/// A side effect for the host to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send an emission to the player's configured channel
    Emit(PlayerId, ChannelOutput),
    /// Execute the given skill for the player
    CastSkill(PlayerId, SkillId),
    /// Cancel the default effect of the input event being handled
    SuppressInput,
}
