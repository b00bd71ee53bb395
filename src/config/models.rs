use prompter_core::model::{DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
use prompter_core::{AppSettings, CueStyle, PlaybackState};
use serde::Deserialize;
use std::time::Duration;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_margin_horizontal")]
    pub margin_horizontal: u16,
    #[serde(default)]
    pub mirrored: bool,
    #[serde(default)]
    pub sidebar_collapsed: bool,
    #[serde(default = "crate::config::defaults::default_cue_enabled")]
    pub cue_enabled: bool,
    #[serde(default = "crate::config::defaults::default_cue_style")]
    pub cue_style: CueStyle,
    #[serde(default = "crate::config::defaults::default_cue_position")]
    pub cue_position: u8,
    #[serde(default = "crate::config::defaults::default_cue_color")]
    pub cue_color: String,
    #[serde(default = "crate::config::defaults::default_cue_opacity")]
    pub cue_opacity: u8,
    #[serde(default = "crate::config::defaults::default_cue_thickness")]
    pub cue_thickness: u8,
    #[serde(default = "crate::config::defaults::default_speed")]
    pub default_speed: f32,
    #[serde(default = "crate::config::defaults::default_sync_debounce_ms")]
    pub sync_debounce_ms: u64,
    #[serde(default = "crate::config::defaults::default_sync_heartbeat_ms")]
    pub sync_heartbeat_ms: u64,
    #[serde(default = "crate::config::defaults::default_commit_interval_ms")]
    pub commit_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_sync_poll_interval_ms")]
    pub sync_poll_interval_ms: u64,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default)]
    pub window_pos_x: Option<f32>,
    #[serde(default)]
    pub window_pos_y: Option<f32>,
    /// Origin of the monitor that should host the external display.
    #[serde(default)]
    pub external_x: Option<f32>,
    #[serde(default)]
    pub external_y: Option<f32>,
    #[serde(default)]
    pub external_width: Option<f32>,
    #[serde(default)]
    pub external_height: Option<f32>,
    #[serde(default = "crate::config::defaults::default_autosave_secs")]
    pub autosave_secs: f32,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_play_pause")]
    pub key_toggle_play_pause: String,
    #[serde(default = "crate::config::defaults::default_key_speed_up")]
    pub key_speed_up: String,
    #[serde(default = "crate::config::defaults::default_key_slow_down")]
    pub key_slow_down: String,
    #[serde(default = "crate::config::defaults::default_key_reset")]
    pub key_reset: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_mirror")]
    pub key_toggle_mirror: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_editor")]
    pub key_toggle_editor: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_fullscreen")]
    pub key_toggle_fullscreen: String,
    #[serde(default = "crate::config::defaults::default_key_close_panel")]
    pub key_close_panel: String,
    #[serde(default = "crate::config::defaults::default_key_next_cue")]
    pub key_next_cue: String,
    #[serde(default = "crate::config::defaults::default_key_prev_cue")]
    pub key_prev_cue: String,
    #[serde(default = "crate::config::defaults::default_key_external_display")]
    pub key_external_display: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            margin_horizontal: crate::config::defaults::default_margin_horizontal(),
            mirrored: false,
            sidebar_collapsed: false,
            cue_enabled: crate::config::defaults::default_cue_enabled(),
            cue_style: crate::config::defaults::default_cue_style(),
            cue_position: crate::config::defaults::default_cue_position(),
            cue_color: crate::config::defaults::default_cue_color(),
            cue_opacity: crate::config::defaults::default_cue_opacity(),
            cue_thickness: crate::config::defaults::default_cue_thickness(),
            default_speed: crate::config::defaults::default_speed(),
            sync_debounce_ms: crate::config::defaults::default_sync_debounce_ms(),
            sync_heartbeat_ms: crate::config::defaults::default_sync_heartbeat_ms(),
            commit_interval_ms: crate::config::defaults::default_commit_interval_ms(),
            sync_poll_interval_ms: crate::config::defaults::default_sync_poll_interval_ms(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            window_pos_x: None,
            window_pos_y: None,
            external_x: None,
            external_y: None,
            external_width: None,
            external_height: None,
            autosave_secs: crate::config::defaults::default_autosave_secs(),
            log_level: crate::config::defaults::default_log_level(),
            key_toggle_play_pause: crate::config::defaults::default_key_toggle_play_pause(),
            key_speed_up: crate::config::defaults::default_key_speed_up(),
            key_slow_down: crate::config::defaults::default_key_slow_down(),
            key_reset: crate::config::defaults::default_key_reset(),
            key_toggle_mirror: crate::config::defaults::default_key_toggle_mirror(),
            key_toggle_editor: crate::config::defaults::default_key_toggle_editor(),
            key_toggle_fullscreen: crate::config::defaults::default_key_toggle_fullscreen(),
            key_close_panel: crate::config::defaults::default_key_close_panel(),
            key_next_cue: crate::config::defaults::default_key_next_cue(),
            key_prev_cue: crate::config::defaults::default_key_prev_cue(),
            key_external_display: crate::config::defaults::default_key_external_display(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    /// Settings the store starts with; out-of-range values are clamped.
    pub fn initial_settings(&self) -> AppSettings {
        AppSettings {
            font_size: self.font_size,
            mirrored: self.mirrored,
            cue_enabled: self.cue_enabled,
            cue_style: self.cue_style,
            cue_position: self.cue_position,
            cue_color: self.cue_color.clone(),
            cue_opacity: self.cue_opacity,
            cue_thickness: self.cue_thickness,
            sidebar_collapsed: self.sidebar_collapsed,
        }
        .clamped()
    }

    pub fn initial_playback(&self) -> PlaybackState {
        let speed = if self.default_speed.is_finite() {
            self.default_speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            DEFAULT_SPEED
        };
        PlaybackState {
            speed,
            ..PlaybackState::default()
        }
    }

    pub fn commit_interval(&self) -> Duration {
        Duration::from_millis(self.commit_interval_ms.max(1))
    }

    pub fn sync_debounce(&self) -> Duration {
        Duration::from_millis(self.sync_debounce_ms)
    }

    pub fn sync_heartbeat(&self) -> Duration {
        Duration::from_millis(self.sync_heartbeat_ms.max(50))
    }

    pub fn sync_poll_interval(&self) -> Duration {
        Duration::from_millis(self.sync_poll_interval_ms.clamp(1, 100))
    }

    pub fn autosave_delay(&self) -> Duration {
        let secs = if self.autosave_secs.is_finite() {
            self.autosave_secs.clamp(0.2, 60.0)
        } else {
            crate::config::defaults::default_autosave_secs()
        };
        Duration::from_secs_f32(secs)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
