//! Process-wide playback state with synchronous subscribe/notify.
//!
//! The store is owned by the process entry point and handed to components by
//! reference. Every committed transition bumps `revision` and invokes all
//! listeners, in registration order, before the mutating call returns.
//! Disallowed actions (deleting the last script, selecting an unknown id) are
//! silent no-ops and do not notify.

use crate::model::{
    AppSettings, CueAction, CueDirection, CueStyle, PlaybackState, SPEED_STEP, SYNCED_SCRIPT_NAME,
    Script, ScriptId,
};
use tracing::{debug, trace};

/// Complete in-memory application state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub scripts: Vec<Script>,
    pub active_script_id: ScriptId,
    pub settings: AppSettings,
    pub playback: PlaybackState,
}

impl AppState {
    pub fn new(settings: AppSettings, playback: PlaybackState, now_ms: u64) -> Self {
        let welcome = Script::welcome(now_ms);
        Self {
            active_script_id: welcome.id.clone(),
            scripts: vec![welcome],
            settings: settings.clamped(),
            playback,
        }
    }

    pub fn active_script(&self) -> Option<&Script> {
        self.scripts
            .iter()
            .find(|script| script.id == self.active_script_id)
    }

    pub fn active_content(&self) -> &str {
        self.active_script()
            .map(|script| script.content.as_str())
            .unwrap_or("")
    }

    fn contains_script(&self, id: &str) -> bool {
        self.scripts.iter().any(|script| script.id == id)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default(), PlaybackState::default(), 0)
    }
}

/// Whole-field replacements merged by [`PromptStore::set`].
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub scripts: Option<Vec<Script>>,
    pub active_script_id: Option<ScriptId>,
    pub settings: Option<AppSettings>,
    pub playback: Option<PlaybackState>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackPatch {
    pub is_playing: Option<bool>,
    pub speed: Option<f32>,
    pub scroll_position: Option<f32>,
    pub elapsed_time: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub font_size: Option<u32>,
    pub mirrored: Option<bool>,
    pub cue_enabled: Option<bool>,
    pub cue_style: Option<CueStyle>,
    pub cue_position: Option<u8>,
    pub cue_color: Option<String>,
    pub cue_opacity: Option<u8>,
    pub cue_thickness: Option<u8>,
    pub sidebar_collapsed: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptPatch {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone)]
pub enum StateCommand {
    AddScript { now_ms: u64 },
    ImportScript { name: String, content: String, now_ms: u64 },
    DeleteScript { id: ScriptId },
    UpdateScript { id: ScriptId, patch: ScriptPatch },
    SetActiveScript { id: ScriptId },
    UpdateSettings { patch: SettingsPatch },
    UpdatePlayback { patch: PlaybackPatch },
    AdjustSpeed { delta: f32 },
    TogglePlay,
    ResetPlayback,
    TriggerCue { direction: CueDirection },
    TickElapsed,
}

impl StateCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::AddScript { .. } => "script_add",
            Self::ImportScript { .. } => "script_import",
            Self::DeleteScript { .. } => "script_delete",
            Self::UpdateScript { .. } => "script_update",
            Self::SetActiveScript { .. } => "script_set_active",
            Self::UpdateSettings { .. } => "settings_update",
            Self::UpdatePlayback { .. } => "playback_update",
            Self::AdjustSpeed { .. } => "playback_adjust_speed",
            Self::TogglePlay => "playback_toggle",
            Self::ResetPlayback => "playback_reset",
            Self::TriggerCue { .. } => "playback_trigger_cue",
            Self::TickElapsed => "playback_tick_elapsed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&AppState) + Send>;

pub struct PromptStore {
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    next_cue_request: u64,
    revision: u64,
}

impl std::fmt::Debug for PromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl PromptStore {
    pub fn new(mut state: AppState) -> Self {
        if state.scripts.is_empty() {
            state.scripts.push(Script::welcome(0));
        }
        if !state.contains_script(&state.active_script_id) {
            state.active_script_id = state.scripts[0].id.clone();
        }
        Self {
            state,
            listeners: Vec::new(),
            next_subscription: 0,
            next_cue_request: 0,
            revision: 0,
        }
    }

    pub fn get(&self) -> &AppState {
        &self.state
    }

    /// Number of committed transitions so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AppState) + Send + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        debug!(listeners = self.listeners.len(), "Store listener subscribed");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        let removed = self.listeners.len() != before;
        if removed {
            debug!(listeners = self.listeners.len(), "Store listener unsubscribed");
        }
        removed
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Merge a patch and notify. Fields that would break an invariant
    /// (empty script list, unknown active id) are dropped from the merge.
    pub fn set(&mut self, patch: StatePatch) {
        if let Some(scripts) = patch.scripts {
            if scripts.is_empty() {
                debug!("Ignoring patch that would leave no scripts");
            } else {
                self.state.scripts = scripts;
            }
        }
        if let Some(id) = patch.active_script_id {
            if self.state.contains_script(&id) {
                self.state.active_script_id = id;
            } else {
                debug!(%id, "Ignoring unknown active script id in patch");
            }
        }
        if !self.state.contains_script(&self.state.active_script_id) {
            self.state.active_script_id = self.state.scripts[0].id.clone();
        }
        if let Some(settings) = patch.settings {
            self.state.settings = settings.clamped();
        }
        if let Some(mut playback) = patch.playback {
            playback.speed = PlaybackState::clamp_speed(playback.speed);
            playback.scroll_position = PlaybackState::clamp_scroll(playback.scroll_position);
            self.state.playback = playback;
        }
        self.commit("state_set");
    }

    /// Apply a command; returns whether a transition was committed.
    pub fn dispatch(&mut self, command: StateCommand) -> bool {
        let action = command.action();
        let committed = match command {
            StateCommand::AddScript { now_ms } => {
                self.add_script(now_ms);
                true
            }
            StateCommand::ImportScript {
                name,
                content,
                now_ms,
            } => {
                self.import_script(name, content, now_ms);
                true
            }
            StateCommand::DeleteScript { id } => self.delete_script(&id),
            StateCommand::UpdateScript { id, patch } => self.update_script(&id, patch),
            StateCommand::SetActiveScript { id } => self.set_active_script(&id),
            StateCommand::UpdateSettings { patch } => {
                self.update_settings(patch);
                true
            }
            StateCommand::UpdatePlayback { patch } => {
                self.update_playback(patch);
                true
            }
            StateCommand::AdjustSpeed { delta } => {
                self.adjust_speed(delta);
                true
            }
            StateCommand::TogglePlay => {
                self.toggle_play();
                true
            }
            StateCommand::ResetPlayback => {
                self.reset_playback();
                true
            }
            StateCommand::TriggerCue { direction } => {
                self.trigger_cue(direction);
                true
            }
            StateCommand::TickElapsed => self.tick_elapsed(),
        };
        if !committed {
            trace!(action, "Command rejected without a state change");
        }
        committed
    }

    pub fn add_script(&mut self, now_ms: u64) -> ScriptId {
        let name = format!("Script {}", self.state.scripts.len() + 1);
        self.insert_script(name, String::new(), now_ms, "script_add")
    }

    /// Create a script from imported text and make it active.
    pub fn import_script(&mut self, name: String, content: String, now_ms: u64) -> ScriptId {
        let name = if name.trim().is_empty() {
            "Imported".to_string()
        } else {
            name
        };
        self.insert_script(name, content, now_ms, "script_import")
    }

    pub fn delete_script(&mut self, id: &str) -> bool {
        if self.state.scripts.len() <= 1 || !self.state.contains_script(id) {
            debug!(%id, scripts = self.state.scripts.len(), "Refusing to delete script");
            return false;
        }
        self.state.scripts.retain(|script| script.id != id);
        if self.state.active_script_id == id {
            self.state.active_script_id = self.state.scripts[0].id.clone();
        }
        self.commit("script_delete");
        true
    }

    pub fn update_script(&mut self, id: &str, patch: ScriptPatch) -> bool {
        let Some(script) = self.state.scripts.iter_mut().find(|script| script.id == id) else {
            return false;
        };
        if let Some(name) = patch.name {
            script.name = name;
        }
        if let Some(content) = patch.content {
            script.content = content;
        }
        self.commit("script_update");
        true
    }

    pub fn set_active_script(&mut self, id: &str) -> bool {
        if !self.state.contains_script(id) {
            return false;
        }
        self.state.active_script_id = id.to_string();
        self.commit("script_set_active");
        true
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        let mut settings = self.state.settings.clone();
        if let Some(font_size) = patch.font_size {
            settings.font_size = font_size;
        }
        if let Some(mirrored) = patch.mirrored {
            settings.mirrored = mirrored;
        }
        if let Some(enabled) = patch.cue_enabled {
            settings.cue_enabled = enabled;
        }
        if let Some(style) = patch.cue_style {
            settings.cue_style = style;
        }
        if let Some(position) = patch.cue_position {
            settings.cue_position = position;
        }
        if let Some(color) = patch.cue_color {
            if crate::model::parse_hex_color(&color).is_some() {
                settings.cue_color = color;
            }
        }
        if let Some(opacity) = patch.cue_opacity {
            settings.cue_opacity = opacity;
        }
        if let Some(thickness) = patch.cue_thickness {
            settings.cue_thickness = thickness;
        }
        if let Some(collapsed) = patch.sidebar_collapsed {
            settings.sidebar_collapsed = collapsed;
        }
        self.state.settings = settings.clamped();
        self.commit("settings_update");
    }

    pub fn update_playback(&mut self, patch: PlaybackPatch) {
        let playback = &mut self.state.playback;
        if let Some(is_playing) = patch.is_playing {
            playback.is_playing = is_playing;
        }
        if let Some(speed) = patch.speed {
            playback.speed = PlaybackState::clamp_speed(speed);
        }
        if let Some(position) = patch.scroll_position {
            playback.scroll_position = PlaybackState::clamp_scroll(position);
        }
        if let Some(elapsed) = patch.elapsed_time {
            playback.elapsed_time = elapsed;
        }
        self.commit("playback_update");
    }

    pub fn adjust_speed(&mut self, delta: f32) {
        let speed = self.state.playback.speed + delta;
        self.update_playback(PlaybackPatch {
            speed: Some(speed),
            ..PlaybackPatch::default()
        });
    }

    pub fn speed_up(&mut self) {
        self.adjust_speed(SPEED_STEP);
    }

    pub fn slow_down(&mut self) {
        self.adjust_speed(-SPEED_STEP);
    }

    pub fn toggle_play(&mut self) {
        self.state.playback.is_playing = !self.state.playback.is_playing;
        self.commit("playback_toggle");
    }

    pub fn reset_playback(&mut self) {
        let playback = &mut self.state.playback;
        playback.is_playing = false;
        playback.scroll_position = 0.0;
        playback.elapsed_time = 0;
        self.commit("playback_reset");
    }

    /// Issue a navigation request with a fresh id.
    pub fn trigger_cue(&mut self, direction: CueDirection) -> u64 {
        self.next_cue_request += 1;
        let request_id = self.next_cue_request;
        self.state.playback.cue_action = Some(CueAction {
            direction,
            request_id,
        });
        self.commit("playback_trigger_cue");
        request_id
    }

    /// One second of playback time; ignored while paused.
    pub fn tick_elapsed(&mut self) -> bool {
        if !self.state.playback.is_playing {
            return false;
        }
        self.state.playback.elapsed_time += 1;
        self.commit("playback_tick_elapsed");
        true
    }

    /// Commit a replicated snapshot as a single transition. Playback and
    /// settings are replaced; the active script is upserted when content is
    /// present, otherwise only selected if it already exists.
    pub fn apply_snapshot(
        &mut self,
        mut playback: PlaybackState,
        settings: AppSettings,
        active_script_id: ScriptId,
        script_content: Option<String>,
        now_ms: u64,
    ) {
        playback.speed = PlaybackState::clamp_speed(playback.speed);
        playback.scroll_position = PlaybackState::clamp_scroll(playback.scroll_position);
        self.state.playback = playback;
        self.state.settings = settings.clamped();

        match script_content {
            Some(content) => {
                match self
                    .state
                    .scripts
                    .iter_mut()
                    .find(|script| script.id == active_script_id)
                {
                    Some(script) => script.content = content,
                    None => self.state.scripts.push(Script {
                        id: active_script_id.clone(),
                        name: SYNCED_SCRIPT_NAME.to_string(),
                        content,
                        created_at_ms: now_ms,
                    }),
                }
                self.state.active_script_id = active_script_id;
            }
            None => {
                if self.state.contains_script(&active_script_id) {
                    self.state.active_script_id = active_script_id;
                }
            }
        }
        self.commit("snapshot_apply");
    }

    fn insert_script(
        &mut self,
        name: String,
        content: String,
        now_ms: u64,
        action: &'static str,
    ) -> ScriptId {
        let id = self.unique_script_id(now_ms);
        self.state.scripts.push(Script {
            id: id.clone(),
            name,
            content,
            created_at_ms: now_ms,
        });
        self.state.active_script_id = id.clone();
        self.commit(action);
        id
    }

    fn unique_script_id(&self, now_ms: u64) -> ScriptId {
        let mut candidate = now_ms;
        while self.state.contains_script(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn commit(&mut self, action: &'static str) {
        self.revision += 1;
        trace!(action, revision = self.revision, "Committed state transition");
        let state = &self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn two_script_store() -> PromptStore {
        let mut store = PromptStore::default();
        store.add_script(1_000);
        store
    }

    #[test]
    fn set_notifies_every_listener_once_with_merged_state() {
        let mut store = PromptStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            store.subscribe(move |state: &AppState| {
                seen.lock()
                    .expect("listener log")
                    .push((tag, state.playback.scroll_position));
            });
        }

        let mut playback = store.get().playback.clone();
        playback.scroll_position = 42.0;
        store.set(StatePatch {
            playback: Some(playback),
            ..StatePatch::default()
        });

        let seen = seen.lock().expect("listener log");
        assert_eq!(*seen, vec![("first", 42.0), ("second", 42.0)]);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn listeners_observe_transitions_in_commit_order() {
        let mut store = PromptStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        store.subscribe(move |state: &AppState| {
            log.lock()
                .expect("listener log")
                .push(state.playback.speed);
        });

        store.speed_up();
        store.speed_up();
        store.slow_down();

        assert_eq!(*seen.lock().expect("listener log"), vec![2.5, 3.0, 2.5]);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let mut store = PromptStore::default();
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        let id = store.subscribe(move |_: &AppState| {
            *counter.lock().expect("counter") += 1;
        });

        store.toggle_play();
        assert!(store.unsubscribe(id));
        store.toggle_play();

        assert_eq!(*calls.lock().expect("counter"), 1);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn deleting_sole_script_is_a_silent_noop() {
        let mut store = PromptStore::default();
        let calls = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&calls);
        store.subscribe(move |_: &AppState| {
            *counter.lock().expect("counter") += 1;
        });

        let id = store.get().active_script_id.clone();
        assert!(!store.delete_script(&id));
        assert_eq!(store.get().scripts.len(), 1);
        assert_eq!(*calls.lock().expect("counter"), 0);
    }

    #[test]
    fn deleting_active_script_moves_selection_to_first_remaining() {
        let mut store = two_script_store();
        let added = store.get().active_script_id.clone();
        assert_eq!(added, "1000");

        assert!(store.delete_script(&added));
        assert_eq!(store.get().scripts.len(), 1);
        assert_eq!(store.get().active_script_id, "1");
    }

    #[test]
    fn deleting_inactive_script_keeps_selection() {
        let mut store = two_script_store();
        assert!(store.delete_script("1"));
        assert_eq!(store.get().active_script_id, "1000");
    }

    #[test]
    fn script_ids_stay_unique_within_one_millisecond() {
        let mut store = PromptStore::default();
        let a = store.add_script(7);
        let b = store.add_script(7);
        assert_ne!(a, b);
        assert_eq!(store.get().scripts.len(), 3);
        assert_eq!(store.get().scripts[2].name, "Script 3");
    }

    #[test]
    fn speed_and_position_are_clamped() {
        let mut store = PromptStore::default();
        store.update_playback(PlaybackPatch {
            speed: Some(50.0),
            scroll_position: Some(-12.0),
            ..PlaybackPatch::default()
        });
        assert_eq!(store.get().playback.speed, 10.0);
        assert_eq!(store.get().playback.scroll_position, 0.0);

        store.update_playback(PlaybackPatch {
            speed: Some(0.0),
            scroll_position: Some(f32::NAN),
            ..PlaybackPatch::default()
        });
        assert_eq!(store.get().playback.speed, 0.5);
        assert_eq!(store.get().playback.scroll_position, 0.0);
    }

    #[test]
    fn reset_clears_position_elapsed_and_play_flag() {
        let mut store = PromptStore::default();
        store.toggle_play();
        store.tick_elapsed();
        store.update_playback(PlaybackPatch {
            scroll_position: Some(300.0),
            ..PlaybackPatch::default()
        });

        store.reset_playback();
        let playback = &store.get().playback;
        assert!(!playback.is_playing);
        assert_eq!(playback.scroll_position, 0.0);
        assert_eq!(playback.elapsed_time, 0);
    }

    #[test]
    fn elapsed_only_advances_while_playing() {
        let mut store = PromptStore::default();
        assert!(!store.tick_elapsed());
        store.toggle_play();
        assert!(store.tick_elapsed());
        assert_eq!(store.get().playback.elapsed_time, 1);
    }

    #[test]
    fn cue_requests_get_increasing_ids() {
        let mut store = PromptStore::default();
        let first = store.trigger_cue(CueDirection::Next);
        let second = store.trigger_cue(CueDirection::Next);
        assert!(second > first);
        assert_eq!(
            store.get().playback.cue_action,
            Some(CueAction {
                direction: CueDirection::Next,
                request_id: second,
            })
        );
    }

    #[test]
    fn set_drops_fields_that_break_invariants() {
        let mut store = PromptStore::default();
        store.set(StatePatch {
            scripts: Some(Vec::new()),
            active_script_id: Some("missing".to_string()),
            ..StatePatch::default()
        });
        assert_eq!(store.get().scripts.len(), 1);
        assert_eq!(store.get().active_script_id, "1");
    }

    #[test]
    fn invalid_cue_color_is_ignored() {
        let mut store = PromptStore::default();
        store.update_settings(SettingsPatch {
            cue_color: Some("not-a-color".to_string()),
            cue_opacity: Some(50),
            ..SettingsPatch::default()
        });
        assert_eq!(store.get().settings.cue_color, "#30d158");
        assert_eq!(store.get().settings.cue_opacity, 50);
    }

    #[test]
    fn dispatch_reports_rejected_commands() {
        let mut store = PromptStore::default();
        assert!(!store.dispatch(StateCommand::SetActiveScript {
            id: "nope".to_string()
        }));
        assert!(store.dispatch(StateCommand::ImportScript {
            name: "  ".to_string(),
            content: "Line".to_string(),
            now_ms: 5,
        }));
        let active = store.get().active_script().expect("imported script");
        assert_eq!(active.name, "Imported");
        assert_eq!(active.content, "Line");
    }

    #[test]
    fn snapshot_for_unknown_script_creates_placeholder_in_one_commit() {
        let mut store = PromptStore::default();
        let playback = PlaybackState {
            is_playing: true,
            scroll_position: 120.0,
            ..PlaybackState::default()
        };

        store.apply_snapshot(
            playback,
            AppSettings::default(),
            "42".to_string(),
            Some("Hello\n>>>\nWorld".to_string()),
            9,
        );

        assert_eq!(store.revision(), 1);
        let state = store.get();
        assert_eq!(state.scripts.len(), 2);
        assert_eq!(state.active_script_id, "42");
        let active = state.active_script().expect("placeholder script");
        assert_eq!(active.name, SYNCED_SCRIPT_NAME);
        assert_eq!(active.content, "Hello\n>>>\nWorld");
        assert!(state.playback.is_playing);
    }

    #[test]
    fn snapshot_without_content_keeps_existing_selection_for_unknown_id() {
        let mut store = PromptStore::default();
        store.apply_snapshot(
            PlaybackState::default(),
            AppSettings::default(),
            "missing".to_string(),
            None,
            0,
        );
        assert_eq!(store.get().active_script_id, "1");
        assert_eq!(store.get().scripts.len(), 1);
    }
}
