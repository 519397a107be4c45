//! Input wiring for the casting state machine.
//!
//! The dispatcher owns everything ephemeral in the subsystem: sessions,
//! broadcast tasks, and the overlay manager. Hosts route their input
//! callbacks to the handlers here and perform the returned [`Effect`]s.
//! All handlers run synchronously on the host's tick thread; per player,
//! transitions are totally ordered by tick.

use hashbrown::HashMap;

use crate::cast::broadcast::{Broadcaster, StopReason};
use crate::cast::channel::CastChannel;
use crate::cast::overlay::{AssignScreen, ClickKind, ClickTarget, OverlayManager, Screen};
use crate::cast::session::CastSession;
use crate::cast::template::render_message;
use crate::cast::{ChannelOutput, Effect};
use crate::consts::{TITLE_FADE_IN, TITLE_FADE_OUT, TITLE_STAY};
use crate::ids::{PlayerId, SkillId, WorldId};
use crate::player::data::{PlayerData, PlayerStore};
use crate::player::skills::SkillRegistry;
use crate::world::settings::Settings;

/// Entry point reacting to toggle and slot-change input, driving the
/// session state machine and the broadcaster lifecycle
#[derive(Debug, Clone)]
pub struct CastDispatcher {
    settings: Settings,
    enabled: bool,
    sessions: HashMap<PlayerId, CastSession>,
    broadcaster: Broadcaster,
    overlay: OverlayManager,
}

impl CastDispatcher {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            enabled: true,
            sessions: HashMap::new(),
            broadcaster: Broadcaster::new(),
            overlay: OverlayManager::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_casting(&self, id: PlayerId) -> bool {
        self.sessions
            .get(&id)
            .is_some_and(|session| session.is_casting())
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    pub fn overlay(&self) -> &OverlayManager {
        &self.overlay
    }

    /// Swap-hands input, repurposed as the casting toggle. The default
    /// hand-swap is always suppressed.
    pub fn on_swap_hands(
        &mut self,
        players: &PlayerStore,
        registry: &SkillRegistry,
        id: PlayerId,
    ) -> Vec<Effect> {
        let mut effects = vec![Effect::SuppressInput];
        let Some(player) = players.get(id) else {
            return effects;
        };

        if self.is_casting(id) {
            self.sessions.entry(id).or_default().set_casting(false);
            self.broadcaster
                .stop(id, self.settings.channel, StopReason::Toggled, &mut effects);
        } else if self.enabled && !player.cast_profile.is_empty() {
            if self.settings.channel.is_visual() {
                self.sessions.entry(id).or_default().set_casting(true);
                self.broadcaster.start(id);
                // no initial delay: the first emission happens now
                self.run_task(players, registry, id, &mut effects);
            } else {
                // the Message channel emits once and never holds the
                // session open
                let message = render_message(player, registry, &self.settings);
                effects.push(Effect::Emit(id, ChannelOutput::Message(message)));
            }
        }
        effects
    }

    /// Active-slot-change input. While casting the change is suppressed
    /// and reinterpreted as a cast of the skill assigned to the new
    /// slot; otherwise the input passes through untouched.
    pub fn on_held_slot_change(
        &mut self,
        players: &PlayerStore,
        id: PlayerId,
        new_slot: usize,
    ) -> Vec<Effect> {
        if !self.is_casting(id) {
            return Vec::new();
        }
        let mut effects = vec![Effect::SuppressInput];
        if let Some(skill) = players
            .get(id)
            .and_then(|player| player.cast_profile.skill_at(new_slot))
        {
            effects.push(Effect::CastSkill(id, skill.clone()));
        }
        effects
    }

    /// One scheduling quantum: run every live broadcast task.
    pub fn tick(&mut self, players: &PlayerStore, registry: &SkillRegistry) -> Vec<Effect> {
        let mut effects = Vec::new();
        for id in self.broadcaster.active_players() {
            self.run_task(players, registry, id, &mut effects);
        }
        effects
    }

    /// One broadcast invocation for one player: exit conditions first,
    /// then recompute and emit.
    fn run_task(
        &mut self,
        players: &PlayerStore,
        registry: &SkillRegistry,
        id: PlayerId,
        effects: &mut Vec<Effect>,
    ) {
        if !self.broadcaster.is_running(id) {
            return;
        }
        if let Some(reason) = self.forced_exit(players, id) {
            if let Some(session) = self.sessions.get_mut(&id) {
                session.set_casting(false);
            }
            self.broadcaster
                .stop(id, self.settings.channel, reason, effects);
            return;
        }
        let Some(player) = players.get(id) else {
            return;
        };
        let message = render_message(player, registry, &self.settings);
        tracing::trace!(player = %id, "cast line refreshed");
        effects.push(Effect::Emit(id, self.visual_output(message)));
        self.broadcaster.note_emission(id);
    }

    /// Polling predicate evaluated at the start of every broadcast
    /// invocation
    fn forced_exit(&self, players: &PlayerStore, id: PlayerId) -> Option<StopReason> {
        if !self.enabled {
            return Some(StopReason::Disabled);
        }
        let Some(player) = players.get(id) else {
            return Some(StopReason::Offline);
        };
        if !player.online {
            return Some(StopReason::Offline);
        }
        if !self.settings.world_enabled(player.world) {
            return Some(StopReason::WorldDisabled);
        }
        if player.cast_profile.is_empty() {
            return Some(StopReason::EmptyProfile);
        }
        if !self.is_casting(id) {
            return Some(StopReason::Toggled);
        }
        None
    }

    fn visual_output(&self, message: String) -> ChannelOutput {
        match self.settings.channel {
            CastChannel::Overlay => ChannelOutput::Overlay(message),
            CastChannel::Title => ChannelOutput::Title {
                title: message,
                subtitle: String::new(),
                fade_in: TITLE_FADE_IN,
                stay: TITLE_STAY,
                fade_out: TITLE_FADE_OUT,
            },
            CastChannel::Subtitle => ChannelOutput::Title {
                title: " ".to_owned(),
                subtitle: message,
                fade_in: TITLE_FADE_IN,
                stay: TITLE_STAY,
                fade_out: TITLE_FADE_OUT,
            },
            CastChannel::Message => ChannelOutput::Message(message),
        }
    }

    /// Screen-open notification, forwarded to the overlay
    pub fn on_screen_open(
        &mut self,
        players: &mut PlayerStore,
        registry: &SkillRegistry,
        id: PlayerId,
        screen: Screen,
    ) {
        self.overlay
            .on_open(players, registry, &self.settings, id, screen);
    }

    /// Click notification while a screen is open, forwarded to the
    /// overlay
    pub fn on_screen_click(
        &mut self,
        players: &mut PlayerStore,
        registry: &SkillRegistry,
        id: PlayerId,
        screen: &AssignScreen,
        target: ClickTarget,
        kind: ClickKind,
    ) -> Vec<Effect> {
        self.overlay
            .on_click(players, registry, &self.settings, id, screen, target, kind)
    }

    /// Screen-close notification, forwarded to the overlay
    pub fn on_screen_close(&mut self, players: &mut PlayerStore, id: PlayerId, screen: Screen) {
        self.overlay.on_close(players, id, screen);
    }

    /// Join notification: close any stale assignment screen and restore
    /// the profile invariant.
    pub fn on_join(&mut self, players: &mut PlayerStore, id: PlayerId) {
        self.init_player(players, id);
    }

    /// Disconnect notification: same cleanup as join, plus dropping the
    /// subsystem-owned entries so nothing leaks for untracked players.
    pub fn on_quit(&mut self, players: &mut PlayerStore, id: PlayerId) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.init_player(players, id);
        self.sessions.remove(&id);
        self.broadcaster
            .stop(id, self.settings.channel, StopReason::Offline, &mut effects);
        effects
    }

    /// World-change notification. Leaving an eligible world for an
    /// ineligible one ends the session and restores the item bar.
    pub fn on_world_change(
        &mut self,
        players: &mut PlayerStore,
        id: PlayerId,
        from: WorldId,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(player) = players.get(id) else {
            return effects;
        };
        let was_eligible = self.settings.world_enabled(from);
        let now_eligible = self.settings.world_enabled(player.world);
        if was_eligible && !now_eligible {
            tracing::debug!(player = %id, world = %player.world, "left eligible world");
            self.init_player(players, id);
            self.sessions.remove(&id);
            self.broadcaster.stop(
                id,
                self.settings.channel,
                StopReason::WorldDisabled,
                &mut effects,
            );
        }
        effects
    }

    /// Class-change notification: the unlocked set changed wholesale.
    pub fn on_class_change(&mut self, players: &mut PlayerStore, id: PlayerId) {
        if let Some(player) = players.get_mut(id) {
            let PlayerData {
                cast_profile,
                unlocked,
                ..
            } = player;
            cast_profile.validate(unlocked);
        }
    }

    /// Skill-unlock notification, after the store recorded the unlock.
    pub fn on_unlock(&mut self, players: &mut PlayerStore, id: PlayerId, skill: &SkillId) {
        if let Some(player) = players.get_mut(id) {
            player.cast_profile.on_unlock(skill, self.settings.cast_slot);
        }
    }

    /// Bring the subsystem up, re-validating every online player.
    pub fn enable(&mut self, players: &mut PlayerStore) {
        self.enabled = true;
        let online: Vec<PlayerId> = players
            .iter()
            .filter(|player| player.online)
            .map(|player| player.id)
            .collect();
        for id in online {
            self.init_player(players, id);
        }
    }

    /// Shut the subsystem down. Every affected player is restored and
    /// force-stopped first; the disabled flag is set last, so a player
    /// mid-assignment gets their real item bar back.
    pub fn disable(&mut self, players: &mut PlayerStore) -> Vec<Effect> {
        let mut effects = Vec::new();
        for id in self.overlay.open_players() {
            self.overlay.restore(players, id);
        }
        for id in self.broadcaster.active_players() {
            if let Some(session) = self.sessions.get_mut(&id) {
                session.set_casting(false);
            }
            self.broadcaster
                .stop(id, self.settings.channel, StopReason::Disabled, &mut effects);
        }
        for player in players.iter_mut().filter(|player| player.online) {
            let PlayerData {
                cast_profile,
                unlocked,
                ..
            } = player;
            cast_profile.validate(unlocked);
        }
        self.sessions.clear();
        self.enabled = false;
        tracing::debug!("casting subsystem disabled");
        effects
    }

    /// Per-player reset shared by join, quit, world-change, and enable:
    /// force-close a stale assignment screen and re-validate the
    /// profile against the current unlocked set.
    fn init_player(&mut self, players: &mut PlayerStore, id: PlayerId) {
        self.overlay.restore(players, id);
        if let Some(player) = players.get_mut(id) {
            let PlayerData {
                cast_profile,
                unlocked,
                ..
            } = player;
            cast_profile.validate(unlocked);
        }
    }
}
