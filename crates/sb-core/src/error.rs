//! Errors for the casting subsystem.

use thiserror::Error;

/// Recoverable errors raised by casting operations.
///
/// Nothing here is fatal to the host: every failure degrades to
/// "assignment rejected" or "casting session ends", and callers that
/// translate player input drop these silently.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    #[error("slot {slot} is out of range (0-{max})")]
    SlotOutOfRange { slot: usize, max: usize },

    #[error("slot {slot} is reserved for the cast menu trigger")]
    ReservedSlot { slot: usize },
}
