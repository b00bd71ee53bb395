use super::super::state::App;
use iced::widget::text_editor;
use prompter_core::{CueDirection, ScriptPatch};
use prompter_core::layout::marker_count;
use std::time::Instant;
use tracing::{debug, info};

impl App {
    /// Entering the editor rewinds playback; leaving it saves.
    pub(super) fn handle_toggle_editor(&mut self) {
        if self.editor.visible {
            self.close_editor();
            return;
        }
        self.store.reset_playback();
        self.load_active_into_editor();
        self.editor.visible = true;
        info!(script = ?self.editor.script_id, "Opened editor");
    }

    pub(super) fn close_editor(&mut self) {
        self.flush_editor();
        self.editor.visible = false;
        info!("Closed editor");
    }

    pub(super) fn handle_editor_action(&mut self, action: text_editor::Action) {
        let is_edit = action.is_edit();
        self.editor.content.perform(action);
        if is_edit {
            self.editor.mark_edited(Instant::now());
        }
    }

    pub(super) fn handle_editor_name_changed(&mut self, name: String) {
        self.editor.name = name;
        self.editor.mark_edited(Instant::now());
    }

    pub(super) fn handle_save_editor(&mut self) {
        if self.flush_editor() {
            self.ui.status = Some(format!("Saved \"{}\"", self.editor.name));
        }
    }

    pub(super) fn handle_insert_cue_point(&mut self) {
        if !self.editor.visible {
            return;
        }
        self.editor.insert_cue_point();
        self.editor.mark_edited(Instant::now());
    }

    pub(super) fn handle_editor_cue_nav(&mut self, direction: CueDirection) {
        if !self.editor.visible {
            return;
        }
        if !self.editor.select_cue(direction) {
            self.ui.status = Some("No cue points in this script".to_string());
        }
    }

    pub(super) fn handle_smart_caps(&mut self) {
        if !self.editor.visible {
            return;
        }
        self.editor.smart_caps();
        self.editor.mark_edited(Instant::now());
        debug!("Applied smart caps");
    }

    pub(super) fn handle_autosave_tick(&mut self, now: Instant) {
        if self
            .editor
            .autosave_due(now, self.config.autosave_delay())
        {
            debug!("Autosaving editor");
            self.flush_editor();
        }
    }

    /// Write the buffer back to its script. Returns whether anything was saved.
    pub(super) fn flush_editor(&mut self) -> bool {
        if !self.editor.dirty {
            return false;
        }
        let Some(id) = self.editor.script_id.clone() else {
            return false;
        };
        let name = self.editor.name.trim();
        let patch = ScriptPatch {
            name: (!name.is_empty()).then(|| name.to_string()),
            content: Some(self.editor.text()),
        };
        let saved = self.store.update_script(&id, patch);
        self.editor.dirty = false;
        self.editor.last_edit_at = None;
        debug!(%id, saved, "Flushed editor buffer");
        saved
    }

    pub(super) fn reload_editor_if_visible(&mut self) {
        if self.editor.visible {
            self.load_active_into_editor();
        }
    }

    fn load_active_into_editor(&mut self) {
        let state = self.store.get();
        if let Some(script) = state.active_script() {
            self.editor.load(script.id.clone(), &script.name, &script.content);
        }
    }

    pub(in crate::app) fn editor_cue_count(&self) -> usize {
        marker_count(&self.editor.text())
    }
}
