use prompter_core::CueStyle;

pub(crate) fn default_font_size() -> u32 {
    48
}

pub(crate) fn default_line_spacing() -> f32 {
    1.5
}

pub(crate) fn default_margin_horizontal() -> u16 {
    80
}

pub(crate) fn default_cue_enabled() -> bool {
    true
}

pub(crate) fn default_cue_style() -> CueStyle {
    CueStyle::Full
}

pub(crate) fn default_cue_position() -> u8 {
    38
}

pub(crate) fn default_cue_color() -> String {
    "#30d158".to_string()
}

pub(crate) fn default_cue_opacity() -> u8 {
    100
}

pub(crate) fn default_cue_thickness() -> u8 {
    2
}

pub(crate) fn default_speed() -> f32 {
    2.0
}

pub(crate) fn default_sync_debounce_ms() -> u64 {
    16
}

pub(crate) fn default_sync_heartbeat_ms() -> u64 {
    500
}

pub(crate) fn default_commit_interval_ms() -> u64 {
    30
}

pub(crate) fn default_sync_poll_interval_ms() -> u64 {
    8
}

pub(crate) fn default_window_width() -> f32 {
    1400.0
}

pub(crate) fn default_window_height() -> f32 {
    900.0
}

pub(crate) fn default_autosave_secs() -> f32 {
    2.0
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Debug
}

pub(crate) fn default_key_toggle_play_pause() -> String {
    "space".to_string()
}

pub(crate) fn default_key_speed_up() -> String {
    "arrowup".to_string()
}

pub(crate) fn default_key_slow_down() -> String {
    "arrowdown".to_string()
}

pub(crate) fn default_key_reset() -> String {
    "r".to_string()
}

pub(crate) fn default_key_toggle_mirror() -> String {
    "m".to_string()
}

pub(crate) fn default_key_toggle_editor() -> String {
    "e".to_string()
}

pub(crate) fn default_key_toggle_fullscreen() -> String {
    "f".to_string()
}

pub(crate) fn default_key_close_panel() -> String {
    "escape".to_string()
}

pub(crate) fn default_key_next_cue() -> String {
    "pagedown".to_string()
}

pub(crate) fn default_key_prev_cue() -> String {
    "pageup".to_string()
}

pub(crate) fn default_key_external_display() -> String {
    "x".to_string()
}

pub(crate) fn default_key_safe_quit() -> String {
    "ctrl+q".to_string()
}
