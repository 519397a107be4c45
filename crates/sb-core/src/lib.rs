//! sb-core: Core logic for the Spellbar skill-casting subsystem
//!
//! This crate contains all casting logic with no I/O dependencies.
//! It is designed to be pure and testable: a host engine feeds input
//! events into [`CastDispatcher`] and calls [`CastDispatcher::tick`]
//! once per scheduling quantum, and everything the host must perform
//! (channel emissions, skill execution, input suppression) comes back
//! as [`Effect`] values.

pub mod cast;
pub mod error;
pub mod ids;
pub mod player;
pub mod world;

mod consts;

pub use cast::broadcast::{Broadcaster, StopReason};
pub use cast::channel::CastChannel;
pub use cast::dispatch::CastDispatcher;
pub use cast::overlay::{AssignScreen, ClickKind, ClickTarget, OverlayManager, Screen};
pub use cast::profile::CastProfile;
pub use cast::session::CastSession;
pub use cast::template::{DEFAULT_TEMPLATE, render_message};
pub use cast::{ChannelOutput, Effect};
pub use consts::*;
pub use error::CastError;
pub use ids::{PlayerId, SkillId, WorldId};
pub use player::data::{PlayerData, PlayerStore};
pub use player::item::Item;
pub use player::skills::{Skill, SkillRegistry};
pub use world::settings::{Settings, WorldPolicy};
