//! Identifier newtypes shared across the crate

use core::fmt;

use serde::{Deserialize, Serialize};

/// Stable player identity assigned by the host
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// World identity used by the eligibility policy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WorldId(pub u32);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world#{}", self.0)
    }
}

/// Skill identifier. Skills are keyed by name, matching how the
/// player-data store refers to them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_id_from_str() {
        let id = SkillId::from("Fireball");
        assert_eq!(id.as_str(), "Fireball");
        assert_eq!(id, SkillId::new("Fireball"));
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerId(7).to_string(), "player#7");
        assert_eq!(WorldId(2).to_string(), "world#2");
        assert_eq!(SkillId::from("Heal").to_string(), "Heal");
    }
}
