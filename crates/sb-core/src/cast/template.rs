//! Cast message rendering.
//!
//! Substitution is a single left-to-right pass resolving a fixed
//! placeholder set against a snapshot of player state taken before the
//! pass begins. Replacement values are never rescanned, so a value that
//! itself contains `{` cannot be substituted twice. Unknown placeholders
//! are left verbatim.

use crate::player::data::PlayerData;
use crate::player::skills::SkillRegistry;
use crate::world::settings::Settings;

/// Default message template
pub const DEFAULT_TEMPLATE: &str = "{skills} | {mana}/{max_mana}";

/// Placeholder values captured before substitution begins
struct Snapshot<'a> {
    player: &'a str,
    level: u32,
    mana: u32,
    max_mana: u32,
    skills: String,
}

impl Snapshot<'_> {
    fn resolve(&self, key: &str) -> Option<String> {
        match key {
            "player" => Some(self.player.to_owned()),
            "level" => Some(self.level.to_string()),
            "mana" => Some(self.mana.to_string()),
            "max_mana" => Some(self.max_mana.to_string()),
            "skills" => Some(self.skills.clone()),
            _ => None,
        }
    }
}

/// Render the cast message for one player from live state
pub fn render_message(player: &PlayerData, registry: &SkillRegistry, settings: &Settings) -> String {
    let snapshot = Snapshot {
        player: &player.name,
        level: player.level,
        mana: player.mana,
        max_mana: player.max_mana,
        skills: render_skills(player, registry, settings),
    };
    substitute(&settings.template, &snapshot)
}

/// Slot indicators for every assigned slot, in slot order.
///
/// Slot labels are one-based to match the hotbar keys players press.
fn render_skills(player: &PlayerData, registry: &SkillRegistry, settings: &Settings) -> String {
    let mut parts = Vec::new();
    for (slot, assigned) in player.cast_profile.slots().iter().enumerate() {
        if slot == settings.cast_slot {
            continue;
        }
        let Some(id) = assigned else { continue };
        let indicator = registry
            .get(id)
            .map(|skill| skill.indicator(true))
            .unwrap_or_else(|| id.to_string());
        parts.push(format!("[{}] {}", slot + 1, indicator));
    }
    parts.join(" ")
}

fn substitute(template: &str, snapshot: &Snapshot) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match tail.find('}') {
            Some(end) => {
                match snapshot.resolve(&tail[1..end]) {
                    Some(value) => out.push_str(&value),
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            None => {
                // unterminated placeholder: emit as-is
                out.push_str(tail);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
