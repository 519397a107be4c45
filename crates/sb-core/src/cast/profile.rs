//! Per-player slot-assignment profile

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::consts::HOTBAR_SLOTS;
use crate::error::CastError;
use crate::ids::SkillId;

/// Slot layout mapping hotbar indices to assigned skills.
///
/// Persisted with the owning player record. Invariant: every non-empty
/// slot references a skill the player currently has unlocked; `validate`
/// restores it whenever the unlocked set changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastProfile {
    #[serde(with = "slot_serde")]
    slots: [Option<SkillId>; HOTBAR_SLOTS],
    /// Place newly unlocked skills into the first empty slot
    #[serde(default)]
    pub auto_assign: bool,
}

impl CastProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign or clear a slot. The reserved menu-trigger slot can never
    /// hold a skill. The caller is responsible for re-rendering.
    pub fn assign(
        &mut self,
        slot: usize,
        skill: Option<SkillId>,
        reserved_slot: usize,
    ) -> Result<(), CastError> {
        if slot >= HOTBAR_SLOTS {
            return Err(CastError::SlotOutOfRange {
                slot,
                max: HOTBAR_SLOTS - 1,
            });
        }
        if slot == reserved_slot {
            return Err(CastError::ReservedSlot { slot });
        }
        self.slots[slot] = skill;
        Ok(())
    }

    pub fn skill_at(&self, slot: usize) -> Option<&SkillId> {
        self.slots.get(slot).and_then(|entry| entry.as_ref())
    }

    pub fn slots(&self) -> &[Option<SkillId>] {
        &self.slots
    }

    pub fn assigned_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|entry| entry.is_none())
    }

    /// Drop entries whose skill is no longer unlocked.
    ///
    /// Slots are visited in index order and never reordered, so the
    /// result is deterministic for a given unlocked set.
    pub fn validate(&mut self, unlocked: &HashSet<SkillId>) {
        for entry in self.slots.iter_mut() {
            if entry.as_ref().is_some_and(|id| !unlocked.contains(id)) {
                *entry = None;
            }
        }
    }

    /// React to a skill unlock. With the auto-assign policy set, the
    /// skill goes into the first empty non-reserved slot; already-placed
    /// skills and full layouts are left alone.
    pub fn on_unlock(&mut self, skill: &SkillId, reserved_slot: usize) {
        if !self.auto_assign {
            return;
        }
        if self.slots.iter().flatten().any(|assigned| assigned == skill) {
            return;
        }
        let empty = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(slot, entry)| *slot != reserved_slot && entry.is_none());
        if let Some((_, entry)) = empty {
            *entry = Some(skill.clone());
        }
    }
}

/// Serde helper for the slot table.
///
/// Persisted as an ordered list of (slot, skill) pairs; a missing slot
/// index means unassigned.
mod slot_serde {
    use serde::de::{self, SeqAccess, Visitor};
    use serde::ser::SerializeSeq;

    use super::*;

    pub fn serialize<S>(
        slots: &[Option<SkillId>; HOTBAR_SLOTS],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let assigned = slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|id| (slot as u8, id)));
        let mut seq = serializer.serialize_seq(Some(slots.iter().flatten().count()))?;
        for pair in assigned {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<[Option<SkillId>; HOTBAR_SLOTS], D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SlotVisitor;

        impl<'de> Visitor<'de> for SlotVisitor {
            type Value = [Option<SkillId>; HOTBAR_SLOTS];

            fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str("a list of (slot, skill) pairs")
            }

            fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut slots: Self::Value = Default::default();
                while let Some((slot, skill)) = access.next_element::<(u8, SkillId)>()? {
                    let slot = slot as usize;
                    if slot >= HOTBAR_SLOTS {
                        return Err(de::Error::custom(format!(
                            "slot index out of range: {slot}"
                        )));
                    }
                    slots[slot] = Some(skill);
                }
                Ok(slots)
            }
        }

        deserializer.deserialize_seq(SlotVisitor)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::consts::DEFAULT_CAST_SLOT;

    fn unlocked(names: &[&str]) -> HashSet<SkillId> {
        names.iter().map(|name| SkillId::from(*name)).collect()
    }

    #[test]
    fn test_assign_and_clear() {
        let mut profile = CastProfile::new();
        profile
            .assign(3, Some(SkillId::from("Fireball")), DEFAULT_CAST_SLOT)
            .unwrap();
        assert_eq!(profile.skill_at(3), Some(&SkillId::from("Fireball")));
        assert_eq!(profile.assigned_count(), 1);

        profile.assign(3, None, DEFAULT_CAST_SLOT).unwrap();
        assert!(profile.is_empty());
    }

    #[test]
    fn test_assign_rejects_reserved_and_out_of_range() {
        let mut profile = CastProfile::new();
        assert_eq!(
            profile.assign(DEFAULT_CAST_SLOT, Some(SkillId::from("Heal")), DEFAULT_CAST_SLOT),
            Err(CastError::ReservedSlot {
                slot: DEFAULT_CAST_SLOT
            })
        );
        assert_eq!(
            profile.assign(9, Some(SkillId::from("Heal")), DEFAULT_CAST_SLOT),
            Err(CastError::SlotOutOfRange { slot: 9, max: 8 })
        );
        assert!(profile.is_empty());
    }

    #[test]
    fn test_validate_drops_locked_entries() {
        let mut profile = CastProfile::new();
        profile
            .assign(0, Some(SkillId::from("Fireball")), DEFAULT_CAST_SLOT)
            .unwrap();
        profile
            .assign(5, Some(SkillId::from("Heal")), DEFAULT_CAST_SLOT)
            .unwrap();

        profile.validate(&unlocked(&["Heal"]));

        assert_eq!(profile.skill_at(0), None);
        assert_eq!(profile.skill_at(5), Some(&SkillId::from("Heal")));
    }

    #[test]
    fn test_on_unlock_auto_assigns_first_empty() {
        let mut profile = CastProfile::new();
        profile.auto_assign = true;
        profile
            .assign(0, Some(SkillId::from("Fireball")), DEFAULT_CAST_SLOT)
            .unwrap();

        profile.on_unlock(&SkillId::from("Heal"), DEFAULT_CAST_SLOT);
        assert_eq!(profile.skill_at(1), Some(&SkillId::from("Heal")));

        // already placed: no duplicate
        profile.on_unlock(&SkillId::from("Heal"), DEFAULT_CAST_SLOT);
        assert_eq!(
            profile.slots().iter().flatten().filter(|id| id.as_str() == "Heal").count(),
            1
        );
    }

    #[test]
    fn test_on_unlock_skips_reserved_slot() {
        let mut profile = CastProfile::new();
        profile.auto_assign = true;
        for slot in 0..HOTBAR_SLOTS {
            if slot != DEFAULT_CAST_SLOT && slot != 7 {
                profile
                    .assign(slot, Some(SkillId::new(format!("Skill{slot}"))), DEFAULT_CAST_SLOT)
                    .unwrap();
            }
        }

        // only slot 7 and the reserved slot 8 are open
        profile.on_unlock(&SkillId::from("Heal"), DEFAULT_CAST_SLOT);
        assert_eq!(profile.skill_at(7), Some(&SkillId::from("Heal")));
        assert_eq!(profile.skill_at(DEFAULT_CAST_SLOT), None);

        // layout full: no-op
        profile.on_unlock(&SkillId::from("Smite"), DEFAULT_CAST_SLOT);
        assert!(!profile.slots().iter().flatten().any(|id| id.as_str() == "Smite"));
    }

    #[test]
    fn test_on_unlock_without_policy_is_noop() {
        let mut profile = CastProfile::new();
        profile.on_unlock(&SkillId::from("Heal"), DEFAULT_CAST_SLOT);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_serde_pair_list_layout() {
        let mut profile = CastProfile::new();
        profile
            .assign(0, Some(SkillId::from("Fireball")), DEFAULT_CAST_SLOT)
            .unwrap();
        profile
            .assign(5, Some(SkillId::from("Heal")), DEFAULT_CAST_SLOT)
            .unwrap();

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json["slots"],
            serde_json::json!([[0, "Fireball"], [5, "Heal"]])
        );

        let back: CastProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_serde_rejects_out_of_range_slot() {
        let json = serde_json::json!({ "slots": [[9, "Fireball"]], "auto_assign": false });
        assert!(serde_json::from_value::<CastProfile>(json).is_err());
    }

    proptest! {
        /// After validate(), every remaining entry is in the unlocked set.
        #[test]
        fn prop_validate_restores_invariant(
            assigned in proptest::collection::vec(proptest::option::of(0u8..6), HOTBAR_SLOTS),
            kept in proptest::collection::hash_set(0u8..6, 0..6),
        ) {
            let mut profile = CastProfile::new();
            for (slot, skill) in assigned.iter().enumerate() {
                if slot == DEFAULT_CAST_SLOT {
                    continue;
                }
                if let Some(n) = skill {
                    profile
                        .assign(slot, Some(SkillId::new(format!("Skill{n}"))), DEFAULT_CAST_SLOT)
                        .unwrap();
                }
            }
            let unlocked: HashSet<SkillId> =
                kept.iter().map(|n| SkillId::new(format!("Skill{n}"))).collect();

            profile.validate(&unlocked);

            for entry in profile.slots().iter().flatten() {
                prop_assert!(unlocked.contains(entry));
            }
        }
    }
}
