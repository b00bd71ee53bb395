use super::super::state::{App, now_ms};
use super::Effect;
use crate::file_io::{OpenedText, export_path_for};
use prompter_core::ScriptId;
use std::path::PathBuf;
use tracing::{info, warn};

impl App {
    pub(super) fn handle_add_script(&mut self) {
        self.flush_editor();
        let id = self.store.add_script(now_ms());
        self.store.reset_playback();
        self.reload_editor_if_visible();
        info!(%id, scripts = self.store.get().scripts.len(), "Added script");
    }

    pub(super) fn handle_delete_script(&mut self, id: ScriptId) {
        if self.editor.script_id.as_deref() == Some(id.as_str()) {
            self.editor.dirty = false;
        }
        let was_active = self.store.get().active_script_id == id;
        if !self.store.delete_script(&id) {
            self.ui.status = Some("The last script cannot be deleted".to_string());
            return;
        }
        if was_active {
            self.store.reset_playback();
            self.reload_editor_if_visible();
        }
        info!(%id, scripts = self.store.get().scripts.len(), "Deleted script");
    }

    pub(super) fn handle_select_script(&mut self, id: ScriptId) {
        if self.store.get().active_script_id == id {
            return;
        }
        self.flush_editor();
        if !self.store.set_active_script(&id) {
            warn!(%id, "Ignoring selection of unknown script");
            return;
        }
        self.store.reset_playback();
        self.reload_editor_if_visible();
        info!(%id, "Selected script");
    }

    pub(super) fn handle_open_path_input_changed(&mut self, path: String) {
        self.ui.open_path_input = path;
    }

    pub(super) fn handle_open_path_requested(&mut self, effects: &mut Vec<Effect>) {
        let raw = self.ui.open_path_input.trim();
        if raw.is_empty() {
            self.ui.status = Some("Enter a path to a text file".to_string());
            return;
        }
        let path = PathBuf::from(raw);
        self.ui.status = Some(format!("Opening {}...", path.display()));
        effects.push(Effect::OpenScriptFile(path));
    }

    pub(super) fn handle_script_file_opened(
        &mut self,
        path: PathBuf,
        result: Result<OpenedText, String>,
    ) {
        match result {
            Ok(opened) => {
                self.flush_editor();
                let id = self
                    .store
                    .import_script(opened.suggested_name.clone(), opened.content, now_ms());
                self.store.reset_playback();
                self.reload_editor_if_visible();
                self.ui.open_path_input.clear();
                self.ui.status = Some(format!("Imported \"{}\"", opened.suggested_name));
                info!(%id, path = %path.display(), "Imported script");
            }
            Err(err) => {
                warn!(path = %path.display(), "Failed to import script: {err}");
                self.ui.status = Some(format!("Could not open {}: {err}", path.display()));
            }
        }
    }

    pub(super) fn handle_export_active_script(&mut self, effects: &mut Vec<Effect>) {
        self.flush_editor();
        let Some(script) = self.store.get().active_script() else {
            return;
        };
        let typed = self.ui.open_path_input.trim();
        let path = if typed.is_empty() {
            export_path_for(&script.name)
        } else {
            PathBuf::from(typed)
        };
        self.ui.status = Some(format!("Exporting to {}...", path.display()));
        effects.push(Effect::SaveScriptFile {
            content: script.content.clone(),
            path,
        });
    }

    pub(super) fn handle_script_file_saved(&mut self, result: Result<PathBuf, String>) {
        self.ui.status = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(err) => {
                warn!("Failed to export script: {err}");
                format!("Export failed: {err}")
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::messages::Message;
    use super::super::super::state::fixtures::build_test_app;
    use super::*;

    #[test]
    fn adding_a_script_selects_it_and_rewinds() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::Wheel(200.0));
        let _ = app.reduce(Message::AddScript);

        let state = app.store.get();
        assert_eq!(state.scripts.len(), 2);
        assert_eq!(state.active_script_id, state.scripts[1].id);
        assert_eq!(state.active_script().map(|s| s.name.as_str()), Some("Script 2"));
        assert_eq!(app.paint_position(), 0.0);
        assert!(app.surface.marker_centers.is_empty());
    }

    #[test]
    fn last_script_cannot_be_deleted() {
        let mut app = build_test_app();
        let id = app.store.get().active_script_id.clone();
        let _ = app.reduce(Message::DeleteScript(id));
        assert_eq!(app.store.get().scripts.len(), 1);
        assert!(app.ui.status.is_some());
    }

    #[test]
    fn deleting_active_script_moves_to_first() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::AddScript);
        let second = app.store.get().active_script_id.clone();
        let _ = app.reduce(Message::DeleteScript(second));
        let state = app.store.get();
        assert_eq!(state.scripts.len(), 1);
        assert_eq!(state.active_script_id, state.scripts[0].id);
    }

    #[test]
    fn unknown_script_selection_is_ignored() {
        let mut app = build_test_app();
        let before = app.store.revision();
        let _ = app.reduce(Message::SelectScript("missing".to_string()));
        assert_eq!(app.store.revision(), before);
    }

    #[test]
    fn opened_file_becomes_active_script() {
        let mut app = build_test_app();
        let _ = app.reduce(Message::ScriptFileOpened {
            path: PathBuf::from("talk.txt"),
            result: Ok(OpenedText {
                content: "Hello\n>>>\nWorld".to_string(),
                suggested_name: "talk".to_string(),
            }),
        });
        let state = app.store.get();
        assert_eq!(state.active_script().map(|s| s.name.as_str()), Some("talk"));
        assert_eq!(app.surface.marker_centers.len(), 1);
    }

    #[test]
    fn export_uses_script_name_by_default() {
        let mut app = build_test_app();
        let effects = app.reduce(Message::ExportActiveScript);
        match effects.as_slice() {
            [Effect::SaveScriptFile { path, content }] => {
                assert_eq!(path, &PathBuf::from("Welcome.txt"));
                assert!(content.contains(">>>"));
            }
            _ => panic!("expected a save effect"),
        }
    }

    #[test]
    fn empty_open_path_only_sets_status() {
        let mut app = build_test_app();
        let effects = app.reduce(Message::OpenPathRequested);
        assert!(effects.is_empty());
        assert!(app.ui.status.is_some());
    }
}
