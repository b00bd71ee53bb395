use super::super::super::messages::Message;
use super::super::super::state::{App, DisplayRole};
use super::super::Effect;
use iced::{Size, window};
use tracing::{debug, info};

impl App {
    pub(in crate::app::update) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.role == DisplayRole::External {
            self.reduce_external(message, &mut effects);
            self.settle();
            return effects;
        }

        match message {
            Message::TogglePlayPause => self.handle_toggle_play_pause(),
            Message::SpeedUp => self.handle_speed_up(),
            Message::SlowDown => self.handle_slow_down(),
            Message::SetSpeed(speed) => self.handle_set_speed(speed),
            Message::ResetPlayback => self.handle_reset_playback(),
            Message::NextCue => self.handle_next_cue(),
            Message::PrevCue => self.handle_prev_cue(),
            Message::Frame(now) => self.handle_frame(now),
            Message::ElapsedTick => self.handle_elapsed_tick(),
            Message::Wheel(delta_y) => self.handle_wheel(delta_y),
            Message::MarkerClicked(index) => self.handle_marker_clicked(index),
            Message::SurfaceResized { width, height } => {
                self.handle_surface_resized(width, height);
            }
            Message::FontSizeChanged(size) => self.handle_font_size_changed(size),
            Message::ToggleMirror => self.handle_toggle_mirror(),
            Message::CueEnabledChanged(enabled) => self.handle_cue_enabled_changed(enabled),
            Message::CueStyleSelected(style) => self.handle_cue_style_selected(style),
            Message::CuePositionChanged(position) => self.handle_cue_position_changed(position),
            Message::CueColorSelected(color) => self.handle_cue_color_selected(color),
            Message::CueOpacityChanged(opacity) => self.handle_cue_opacity_changed(opacity),
            Message::CueThicknessChanged(thickness) => {
                self.handle_cue_thickness_changed(thickness);
            }
            Message::ToggleSettings => self.handle_toggle_settings(),
            Message::ToggleSidebar => self.handle_toggle_sidebar(),
            Message::ToggleFullscreen => self.handle_toggle_fullscreen(&mut effects),
            Message::AddScript => self.handle_add_script(),
            Message::DeleteScript(id) => self.handle_delete_script(id),
            Message::SelectScript(id) => self.handle_select_script(id),
            Message::OpenPathInputChanged(path) => self.handle_open_path_input_changed(path),
            Message::OpenPathRequested => self.handle_open_path_requested(&mut effects),
            Message::ScriptFileOpened { path, result } => {
                self.handle_script_file_opened(path, result);
            }
            Message::ExportActiveScript => self.handle_export_active_script(&mut effects),
            Message::ScriptFileSaved(result) => self.handle_script_file_saved(result),
            Message::ToggleEditor => self.handle_toggle_editor(),
            Message::EditorAction(action) => self.handle_editor_action(action),
            Message::EditorNameChanged(name) => self.handle_editor_name_changed(name),
            Message::SaveEditor => self.handle_save_editor(),
            Message::InsertCuePoint => self.handle_insert_cue_point(),
            Message::EditorCueNav(direction) => self.handle_editor_cue_nav(direction),
            Message::SmartCaps => self.handle_smart_caps(),
            Message::AutosaveTick(now) => self.handle_autosave_tick(now),
            Message::ClosePanel => self.handle_close_panel(&mut effects),
            Message::OpenExternalDisplay => effects.push(Effect::OpenExternalDisplay),
            Message::CloseExternalDisplay => effects.push(Effect::CloseExternalDisplay),
            Message::SyncTick(now) => self.handle_sync_tick(now),
            Message::DisplayInbox(_) => {}
            Message::WindowOpened(id) => self.handle_window_opened(id, &mut effects),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height);
            }
            Message::KeyPressed { key, modifiers } => {
                // The editor keeps every key except the close binding.
                let shortcut = if self.editor.visible {
                    self.close_shortcut_pressed(key, modifiers)
                        .then_some(Message::ClosePanel)
                } else {
                    self.shortcut_message_for_key(key, modifiers)
                };
                if let Some(shortcut) = shortcut {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(&mut effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
        }

        self.settle();
        effects
    }

    /// The external display only listens; it never edits shared state.
    fn reduce_external(&mut self, message: Message, effects: &mut Vec<Effect>) {
        match message {
            Message::DisplayInbox(event) => self.handle_display_inbox(event, effects),
            Message::WindowOpened(id) => {
                self.window_id = Some(id);
                effects.push(Effect::SetFullscreen(true));
            }
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height);
            }
            Message::SurfaceResized { width, height } => {
                self.handle_surface_resized(width, height);
            }
            Message::KeyPressed { key, modifiers } => {
                if self.close_shortcut_pressed(key, modifiers) {
                    info!("Escape pressed on external display");
                    effects.push(Effect::QuitSafely);
                }
            }
            Message::PollSystemSignals => self.handle_poll_system_signals(effects),
            Message::SafeQuit => effects.push(Effect::QuitSafely),
            other => debug!(?other, "External display ignores message"),
        }
    }

    fn handle_window_opened(&mut self, id: window::Id, effects: &mut Vec<Effect>) {
        if self.window_id.is_some() {
            return;
        }
        self.window_id = Some(id);
        if self.ui.fullscreen {
            effects.push(Effect::SetFullscreen(true));
        }
    }

    fn handle_window_resized(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        self.config.window_width = width.clamp(320.0, 7680.0);
        self.config.window_height = height.clamp(240.0, 4320.0);
        debug!(width, height, "Window size changed");
    }

    fn handle_surface_resized(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return;
        }
        if self.surface.report(Size::new(width, height)) {
            debug!(width, height, "Prompter surface resized");
        }
    }

    fn handle_toggle_fullscreen(&mut self, effects: &mut Vec<Effect>) {
        self.ui.fullscreen = !self.ui.fullscreen;
        info!(fullscreen = self.ui.fullscreen, "Toggled fullscreen");
        effects.push(Effect::SetFullscreen(self.ui.fullscreen));
    }

    fn handle_close_panel(&mut self, effects: &mut Vec<Effect>) {
        if self.editor.visible {
            self.close_editor();
        } else if self.ui.show_settings {
            self.ui.show_settings = false;
        } else if self.ui.fullscreen {
            self.ui.fullscreen = false;
            effects.push(Effect::SetFullscreen(false));
        }
    }

    fn handle_poll_system_signals(&mut self, effects: &mut Vec<Effect>) {
        if crate::take_sigint_requested() {
            info!("Ctrl+C received; quitting");
            effects.push(Effect::QuitSafely);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::super::state::fixtures::{build_external_app, build_test_app};
    use super::*;
    use iced::keyboard::{Key, Modifiers, key};

    #[test]
    fn escape_closes_editor_before_settings() {
        let mut app = build_test_app();
        app.ui.show_settings = true;
        let _ = app.reduce(Message::ToggleEditor);
        assert!(app.editor.visible);

        let _ = app.reduce(Message::ClosePanel);
        assert!(!app.editor.visible);
        assert!(app.ui.show_settings);

        let _ = app.reduce(Message::ClosePanel);
        assert!(!app.ui.show_settings);
    }

    #[test]
    fn space_key_toggles_playback() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Space),
            modifiers: Modifiers::default(),
        });
        assert!(app.store.get().playback.is_playing);
    }

    #[test]
    fn open_editor_swallows_shortcuts_except_escape() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::ToggleEditor);
        for named in [key::Named::Space, key::Named::PageDown, key::Named::ArrowUp] {
            let _ = app.reduce(Message::KeyPressed {
                key: Key::Named(named),
                modifiers: Modifiers::default(),
            });
        }
        let playback = &app.store.get().playback;
        assert!(!playback.is_playing);
        assert_eq!(playback.speed, 2.0);
        assert!(playback.cue_action.is_none());
        assert!(app.editor.visible);

        let _ = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Escape),
            modifiers: Modifiers::default(),
        });
        assert!(!app.editor.visible);
    }

    #[test]
    fn surface_resize_changes_scroll_bound() {
        let mut app = build_test_app();
        let before = app.animator.max_scroll();
        let _ = app.reduce(Message::SurfaceResized {
            width: app.surface.viewport.width,
            height: 400.0,
        });
        assert!(app.animator.max_scroll() > before);
    }

    #[test]
    fn external_display_ignores_playback_controls() {
        let mut app = build_external_app();
        let _ = app.reduce(Message::TogglePlayPause);
        let _ = app.reduce(Message::Wheel(300.0));
        let _ = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Space),
            modifiers: Modifiers::default(),
        });
        let playback = &app.store.get().playback;
        assert!(!playback.is_playing);
        assert_eq!(playback.scroll_position, 0.0);
        assert_eq!(app.store.revision(), 0);
    }

    #[test]
    fn escape_quits_external_display() {
        let mut app = build_external_app();
        let effects = app.reduce(Message::KeyPressed {
            key: Key::Named(key::Named::Escape),
            modifiers: Modifiers::default(),
        });
        assert!(matches!(effects.as_slice(), [Effect::QuitSafely]));
    }
}
