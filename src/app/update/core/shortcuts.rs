use super::super::super::messages::Message;
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = Self::pressed_token(&key)?;
        let config = &self.config;

        let bindings: [(&str, &str, Message); 12] = [
            (&config.key_toggle_play_pause, "space", Message::TogglePlayPause),
            (&config.key_speed_up, "arrowup", Message::SpeedUp),
            (&config.key_slow_down, "arrowdown", Message::SlowDown),
            (&config.key_reset, "r", Message::ResetPlayback),
            (&config.key_toggle_mirror, "m", Message::ToggleMirror),
            (&config.key_toggle_editor, "e", Message::ToggleEditor),
            (&config.key_toggle_fullscreen, "f", Message::ToggleFullscreen),
            (&config.key_close_panel, "escape", Message::ClosePanel),
            (&config.key_next_cue, "pagedown", Message::NextCue),
            (&config.key_prev_cue, "pageup", Message::PrevCue),
            (&config.key_external_display, "x", Message::OpenExternalDisplay),
            (&config.key_safe_quit, "ctrl+q", Message::SafeQuit),
        ];

        bindings
            .into_iter()
            .find(|(raw, fallback, _)| Self::shortcut_matches(raw, fallback, &pressed, modifiers))
            .map(|(_, _, message)| message)
    }

    /// Escape (or its rebinding) on the external display.
    pub(super) fn close_shortcut_pressed(&self, key: Key, modifiers: Modifiers) -> bool {
        Self::pressed_token(&key).is_some_and(|pressed| {
            Self::shortcut_matches(&self.config.key_close_panel, "escape", &pressed, modifiers)
        })
    }

    fn pressed_token(key: &Key) -> Option<String> {
        let token = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Named(key::Named::ArrowUp) => "arrowup".to_string(),
            Key::Named(key::Named::ArrowDown) => "arrowdown".to_string(),
            Key::Named(key::Named::PageUp) => "pageup".to_string(),
            Key::Named(key::Named::PageDown) => "pagedown".to_string(),
            Key::Named(key::Named::Escape) => "escape".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };
        Some(token)
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let Some(required_key) = required_key else {
            return false;
        };
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return fallback.to_string();
        }
        normalized
            .split('+')
            .map(|token| match token.trim() {
                "spacebar" => "space",
                "esc" => "escape",
                "up" => "arrowup",
                "down" => "arrowdown",
                "pgup" => "pageup",
                "pgdn" => "pagedown",
                other => other,
            })
            .collect::<Vec<_>>()
            .join("+")
    }
}
