use super::super::state::App;
use prompter_core::{CueStyle, SettingsPatch};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_font_size_changed(&mut self, size: u32) {
        debug!(
            old = self.store.get().settings.font_size,
            new = size,
            "Font size changed"
        );
        self.store.update_settings(SettingsPatch {
            font_size: Some(size),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_toggle_mirror(&mut self) {
        let mirrored = !self.store.get().settings.mirrored;
        info!(mirrored, "Toggled mirror mode");
        self.store.update_settings(SettingsPatch {
            mirrored: Some(mirrored),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_cue_enabled_changed(&mut self, enabled: bool) {
        self.store.update_settings(SettingsPatch {
            cue_enabled: Some(enabled),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_cue_style_selected(&mut self, style: CueStyle) {
        debug!(%style, "Cue style selected");
        self.store.update_settings(SettingsPatch {
            cue_style: Some(style),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_cue_position_changed(&mut self, position: u8) {
        self.store.update_settings(SettingsPatch {
            cue_position: Some(position),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_cue_color_selected(&mut self, color: String) {
        self.store.update_settings(SettingsPatch {
            cue_color: Some(color),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_cue_opacity_changed(&mut self, opacity: u8) {
        self.store.update_settings(SettingsPatch {
            cue_opacity: Some(opacity),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_cue_thickness_changed(&mut self, thickness: u8) {
        self.store.update_settings(SettingsPatch {
            cue_thickness: Some(thickness),
            ..SettingsPatch::default()
        });
    }

    pub(super) fn handle_toggle_settings(&mut self) {
        debug!("Toggled settings panel");
        self.ui.show_settings = !self.ui.show_settings;
    }

    pub(super) fn handle_toggle_sidebar(&mut self) {
        let collapsed = !self.store.get().settings.sidebar_collapsed;
        self.store.update_settings(SettingsPatch {
            sidebar_collapsed: Some(collapsed),
            ..SettingsPatch::default()
        });
    }
}
