//! Shared constants

/// Number of hotbar slots the casting layout virtualizes
pub const HOTBAR_SLOTS: usize = 9;

/// Default hotbar slot reserved as the cast menu trigger
pub const DEFAULT_CAST_SLOT: usize = 8;

/// Broadcast interval in ticks, the finest granularity the host
/// scheduler offers
pub const BROADCAST_INTERVAL: u64 = 1;

/// Title/subtitle fade-in in ticks
pub const TITLE_FADE_IN: u32 = 0;

/// Title/subtitle stay in ticks; covers one broadcast interval so
/// consecutive emissions do not flicker
pub const TITLE_STAY: u32 = BROADCAST_INTERVAL as u32;

/// Title/subtitle fade-out in ticks
pub const TITLE_FADE_OUT: u32 = 0;
