mod constants;
mod editor;
mod surface;
mod ui;

use crate::config::AppConfig;
use iced::{Size, Task, window};
use prompter_core::sync::{SnapshotReceiver, SyncPublisher, SyncSchedule, WindowHost};
use prompter_core::{AppState, CueNavigator, LayoutParams, PromptStore, ScrollAnimator};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use editor::EditorState;
pub(in crate::app) use surface::{LayoutKey, SurfaceState};
pub(in crate::app) use ui::UiState;

/// Which side of the replication this process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DisplayRole {
    /// Operator window: owns the animator and publishes snapshots.
    Primary,
    /// Borderless mirror that only paints what it receives.
    External,
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) role: DisplayRole,
    pub(super) config: AppConfig,
    pub(super) store: PromptStore,
    pub(super) animator: ScrollAnimator,
    pub(super) cues: CueNavigator,
    pub(super) publisher: Option<SyncPublisher<Box<dyn WindowHost>>>,
    pub(super) receiver: SnapshotReceiver,
    pub(super) surface: SurfaceState,
    pub(super) editor: EditorState,
    pub(super) ui: UiState,
    pub(super) window_id: Option<window::Id>,
}

pub(in crate::app) fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

impl App {
    fn new(role: DisplayRole, config: AppConfig, host: Option<Box<dyn WindowHost>>) -> App {
        let state = AppState::new(
            config.initial_settings(),
            config.initial_playback(),
            now_ms(),
        );
        let publisher = host.map(|host| {
            SyncPublisher::new(
                host,
                SyncSchedule::new(config.sync_debounce(), config.sync_heartbeat()),
            )
        });
        let mut app = App {
            role,
            animator: ScrollAnimator::new(config.commit_interval()),
            store: PromptStore::new(state),
            cues: CueNavigator::new(),
            publisher,
            receiver: SnapshotReceiver::new(),
            surface: SurfaceState::new(Size::new(config.window_width, config.window_height)),
            editor: EditorState::default(),
            ui: UiState::default(),
            window_id: None,
            config,
        };
        app.refresh_layout();
        app
    }

    /// Operator window. `host` is where the external display gets created.
    pub(super) fn bootstrap(config: AppConfig, host: Box<dyn WindowHost>) -> (App, Task<Message>) {
        let app = App::new(DisplayRole::Primary, config, Some(host));
        info!(
            scripts = app.store.get().scripts.len(),
            speed = app.store.get().playback.speed,
            "Primary window ready"
        );
        let task = window::get_latest().and_then(|id| Task::done(Message::WindowOpened(id)));
        (app, task)
    }

    pub(super) fn bootstrap_external(config: AppConfig) -> (App, Task<Message>) {
        let app = App::new(DisplayRole::External, config, None);
        info!("External display waiting for snapshots");
        let task = window::get_latest().and_then(|id| Task::done(Message::WindowOpened(id)));
        (app, task)
    }

    pub(super) fn is_primary(&self) -> bool {
        self.role == DisplayRole::Primary
    }

    /// Scroll offset the canvas should paint.
    pub(super) fn paint_position(&self) -> f32 {
        match self.role {
            DisplayRole::Primary => self.animator.position(),
            DisplayRole::External => self
                .store
                .get()
                .playback
                .scroll_position
                .clamp(0.0, self.surface.max_scroll()),
        }
    }

    pub(super) fn progress(&self) -> f32 {
        let max = self.surface.max_scroll();
        if max > 0.0 {
            (self.paint_position() / max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Canvas size implied by the window and the panels around it.
    pub(super) fn estimated_viewport(&self) -> Size {
        let window = Size::new(self.config.window_width, self.config.window_height);
        if !self.is_primary() {
            return window;
        }
        let mut width = window.width;
        if !self.store.get().settings.sidebar_collapsed {
            width -= SIDEBAR_WIDTH;
        }
        if self.ui.show_settings {
            width -= SETTINGS_PANEL_WIDTH;
        }
        Size::new(
            width.max(1.0),
            (window.height - CONTROL_BAR_HEIGHT).max(1.0),
        )
    }

    pub(super) fn text_width(&self) -> f32 {
        let margin = f32::from(self.config.margin_horizontal) * 2.0;
        (self.surface.viewport.width - margin).max(self.surface.viewport.width * 0.25)
    }

    /// Re-measure the active script when content, font or width changed,
    /// and push the new bound into the animator.
    pub(super) fn refresh_layout(&mut self) {
        let estimate = self.estimated_viewport();
        self.surface.set_estimate(estimate);
        let state = self.store.get();
        let font_size = state.settings.font_size;
        let width = self.text_width();
        let key = LayoutKey::new(&state.active_script_id, state.active_content(), font_size, width);
        let mut params = LayoutParams::new(font_size as f32, width);
        params.line_spacing = self.config.line_spacing;

        if self.surface.remeasure(key, state.active_content(), &params) {
            debug!(
                font_size,
                width,
                text_height = self.surface.layout.text_height(),
                markers = self.surface.marker_centers.len(),
                "Measured script layout"
            );
        }
        if self.is_primary() {
            let max = self.surface.max_scroll();
            if max != self.animator.max_scroll() {
                self.animator.set_max_scroll(max, &mut self.store);
            }
        }
    }

    /// Settle derived state after a message: layout, pending cue jumps, and
    /// the animator's view of the store.
    pub(super) fn settle(&mut self) {
        self.refresh_layout();
        if !self.is_primary() {
            return;
        }
        self.cues.process(
            &mut self.store,
            &self.surface.marker_centers,
            self.animator.max_scroll(),
        );
        self.animator.reconcile(&mut self.store);
    }
}

#[cfg(test)]
pub(in crate::app) mod fixtures {
    use super::*;
    use prompter_core::sync::DetachedHost;

    pub(in crate::app) fn build_test_app() -> App {
        let mut config = AppConfig::default();
        config.window_width = 1200.0;
        config.window_height = 800.0;
        let (app, _task) = App::bootstrap(config, Box::new(DetachedHost));
        app
    }

    pub(in crate::app) fn build_external_app() -> App {
        let (app, _task) = App::bootstrap_external(AppConfig::default());
        app
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn welcome_script_is_measured_on_startup() {
        let app = build_test_app();
        assert_eq!(app.surface.marker_centers.len(), 4);
        assert!(app.animator.max_scroll() > 0.0);
        assert_eq!(app.paint_position(), 0.0);
    }

    #[test]
    fn external_app_has_no_publisher() {
        let app = build_external_app();
        assert!(app.publisher.is_none());
        assert!(!app.is_primary());
    }
}
