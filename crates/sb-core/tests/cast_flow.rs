//! End-to-end flows across the casting subsystem: toggle, broadcast,
//! overlay round-trips, and forced shutdown.

use sb_core::{
    AssignScreen, CastChannel, CastDispatcher, ChannelOutput, ClickKind, ClickTarget, Effect,
    Item, PlayerData, PlayerId, PlayerStore, Screen, Settings, Skill, SkillId, SkillRegistry,
    WorldId,
};

fn registry() -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    registry.register(Skill::new("Fireball", 12, '*'));
    registry.register(Skill::new("Heal", 8, '+'));
    registry
}

fn player_with(skills: &[(usize, &str)]) -> (PlayerStore, PlayerId) {
    let id = PlayerId(1);
    let mut player = PlayerData::new(id, "Aria", WorldId(0));
    let cast_slot = Settings::default().cast_slot;
    for (slot, name) in skills {
        player.unlock(*name);
        player
            .cast_profile
            .assign(*slot, Some(SkillId::from(*name)), cast_slot)
            .unwrap();
    }
    let mut players = PlayerStore::new();
    players.insert(player);
    (players, id)
}

fn overlay_lines(effects: &[Effect]) -> Vec<&str> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Emit(_, ChannelOutput::Overlay(line)) => Some(line.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn overlay_session_full_cycle() {
    let registry = registry();
    let (players, id) = player_with(&[(0, "Fireball"), (5, "Heal")]);
    let mut dispatcher = CastDispatcher::new(Settings::default());

    // toggle on: casting, broadcaster live, immediate emission
    let effects = dispatcher.on_swap_hands(&players, &registry, id);
    assert!(dispatcher.is_casting(id));
    assert!(dispatcher.broadcaster().is_running(id));
    let lines = overlay_lines(&effects);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Fireball") && lines[0].contains("Heal"));

    // ticks keep refreshing the same line
    let effects = dispatcher.tick(&players, &registry);
    assert!(overlay_lines(&effects)[0].contains("[1] Fireball"));
    assert!(overlay_lines(&effects)[0].contains("[6] Heal"));

    // toggle off: idle, task gone, one empty-line clear
    let effects = dispatcher.on_swap_hands(&players, &registry, id);
    assert!(!dispatcher.is_casting(id));
    assert!(!dispatcher.broadcaster().is_running(id));
    assert_eq!(overlay_lines(&effects), vec![""]);

    // nothing left running
    assert!(dispatcher.tick(&players, &registry).is_empty());
}

#[test]
fn message_session_is_one_shot() {
    let registry = registry();
    let (players, id) = player_with(&[(0, "Fireball")]);
    let settings = Settings {
        channel: CastChannel::Message,
        ..Settings::default()
    };
    let mut dispatcher = CastDispatcher::new(settings);

    let effects = dispatcher.on_swap_hands(&players, &registry, id);
    let messages: Vec<_> = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Emit(_, ChannelOutput::Message(_))))
        .collect();
    assert_eq!(messages.len(), 1);
    assert!(!dispatcher.is_casting(id));
    assert_eq!(dispatcher.broadcaster().active_count(), 0);
}

#[test]
fn held_slot_change_casts_without_moving_slot() {
    let registry = registry();
    let (players, id) = player_with(&[(2, "Heal")]);
    let mut dispatcher = CastDispatcher::new(Settings::default());
    dispatcher.on_swap_hands(&players, &registry, id);

    let effects = dispatcher.on_held_slot_change(&players, id, 2);
    let casts: Vec<_> = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::CastSkill(_, skill) if skill.as_str() == "Heal"))
        .collect();
    assert_eq!(casts.len(), 1);
    assert!(effects.contains(&Effect::SuppressInput));
    assert_eq!(players.get(id).unwrap().active_slot, 0);
    assert!(dispatcher.is_casting(id));
}

#[test]
fn assignment_screen_round_trip_with_real_items() {
    let registry = registry();
    let (mut players, id) = player_with(&[]);
    {
        let player = players.get_mut(id).unwrap();
        player.unlock("Fireball");
        player.hotbar[0] = Some(Item::new("Iron Sword", '/'));
        player.hotbar[7] = Some(Item::new("Torch", 'i'));
    }
    let before = players.get(id).unwrap().hotbar.clone();
    let mut dispatcher = CastDispatcher::new(Settings::default());

    dispatcher.on_screen_open(&mut players, &registry, id, Screen::SkillAssignment);
    assert!(dispatcher.overlay().is_open(id));

    // bind Fireball to hotbar key 4 via a number-key click
    let mut screen = AssignScreen::new();
    screen.set(10, SkillId::from("Fireball"));
    let effects = dispatcher.on_screen_click(
        &mut players,
        &registry,
        id,
        &screen,
        ClickTarget::Screen(10),
        ClickKind::NumberKey { hotbar_button: 3 },
    );
    assert_eq!(effects, vec![Effect::SuppressInput]);

    dispatcher.on_screen_close(&mut players, id, Screen::SkillAssignment);
    assert!(!dispatcher.overlay().is_open(id));

    // the real bar is back byte-for-byte, and the assignment survives
    assert_eq!(players.get(id).unwrap().hotbar, before);
    assert_eq!(
        players.get(id).unwrap().cast_profile.skill_at(3),
        Some(&SkillId::from("Fireball"))
    );
}

#[test]
fn disable_mid_assignment_restores_everyone() {
    let registry = registry();
    let (mut players, id) = player_with(&[(0, "Fireball")]);
    players.get_mut(id).unwrap().hotbar[2] = Some(Item::new("Apple", 'a'));
    let before = players.get(id).unwrap().hotbar.clone();

    let other = PlayerId(2);
    let mut second = PlayerData::new(other, "Brin", WorldId(0));
    second.unlock("Heal");
    second
        .cast_profile
        .assign(1, Some(SkillId::from("Heal")), Settings::default().cast_slot)
        .unwrap();
    players.insert(second);

    let mut dispatcher = CastDispatcher::new(Settings::default());
    dispatcher.on_screen_open(&mut players, &registry, id, Screen::SkillAssignment);
    dispatcher.on_swap_hands(&players, &registry, other);
    assert!(dispatcher.is_casting(other));

    let effects = dispatcher.disable(&mut players);

    assert!(!dispatcher.is_enabled());
    assert!(!dispatcher.overlay().is_open(id));
    assert_eq!(players.get(id).unwrap().hotbar, before);
    assert!(!dispatcher.is_casting(other));
    // the casting player's overlay line was cleared exactly once
    assert_eq!(overlay_lines(&effects), vec![""]);
}

#[test]
fn profile_survives_serde_round_trip() {
    let (players, id) = player_with(&[(0, "Fireball"), (5, "Heal")]);
    let json = serde_json::to_string(players.get(id).unwrap()).unwrap();
    let back: PlayerData = serde_json::from_str(&json).unwrap();
    assert_eq!(back.cast_profile, players.get(id).unwrap().cast_profile);
}
