use super::defaults;
use super::models::{AppConfig, LogLevel};
use prompter_core::CueStyle;
use serde::Deserialize;

/// Section names that mark a file as written in the sectioned form.
pub(super) const SECTION_NAMES: [&str; 9] = [
    "appearance",
    "cue",
    "playback",
    "sync",
    "window",
    "external",
    "editor",
    "logging",
    "keys",
];

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    appearance: AppearanceConfig,
    #[serde(default)]
    cue: CueConfig,
    #[serde(default)]
    playback: PlaybackConfig,
    #[serde(default)]
    sync: SyncConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    external: ExternalConfig,
    #[serde(default)]
    editor: EditorConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    keys: KeysConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            font_size: tables.appearance.font_size,
            line_spacing: tables.appearance.line_spacing,
            margin_horizontal: tables.appearance.margin_horizontal,
            mirrored: tables.appearance.mirrored,
            sidebar_collapsed: tables.appearance.sidebar_collapsed,
            cue_enabled: tables.cue.cue_enabled,
            cue_style: tables.cue.cue_style,
            cue_position: tables.cue.cue_position,
            cue_color: tables.cue.cue_color,
            cue_opacity: tables.cue.cue_opacity,
            cue_thickness: tables.cue.cue_thickness,
            default_speed: tables.playback.default_speed,
            sync_debounce_ms: tables.sync.sync_debounce_ms,
            sync_heartbeat_ms: tables.sync.sync_heartbeat_ms,
            commit_interval_ms: tables.sync.commit_interval_ms,
            sync_poll_interval_ms: tables.sync.sync_poll_interval_ms,
            window_width: tables.window.window_width,
            window_height: tables.window.window_height,
            window_pos_x: tables.window.window_pos_x,
            window_pos_y: tables.window.window_pos_y,
            external_x: tables.external.external_x,
            external_y: tables.external.external_y,
            external_width: tables.external.external_width,
            external_height: tables.external.external_height,
            autosave_secs: tables.editor.autosave_secs,
            log_level: tables.logging.log_level,
            key_toggle_play_pause: tables.keys.key_toggle_play_pause,
            key_speed_up: tables.keys.key_speed_up,
            key_slow_down: tables.keys.key_slow_down,
            key_reset: tables.keys.key_reset,
            key_toggle_mirror: tables.keys.key_toggle_mirror,
            key_toggle_editor: tables.keys.key_toggle_editor,
            key_toggle_fullscreen: tables.keys.key_toggle_fullscreen,
            key_close_panel: tables.keys.key_close_panel,
            key_next_cue: tables.keys.key_next_cue,
            key_prev_cue: tables.keys.key_prev_cue,
            key_external_display: tables.keys.key_external_display,
            key_safe_quit: tables.keys.key_safe_quit,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            appearance: AppearanceConfig {
                font_size: config.font_size,
                line_spacing: config.line_spacing,
                margin_horizontal: config.margin_horizontal,
                mirrored: config.mirrored,
                sidebar_collapsed: config.sidebar_collapsed,
            },
            cue: CueConfig {
                cue_enabled: config.cue_enabled,
                cue_style: config.cue_style,
                cue_position: config.cue_position,
                cue_color: config.cue_color.clone(),
                cue_opacity: config.cue_opacity,
                cue_thickness: config.cue_thickness,
            },
            playback: PlaybackConfig {
                default_speed: config.default_speed,
            },
            sync: SyncConfig {
                sync_debounce_ms: config.sync_debounce_ms,
                sync_heartbeat_ms: config.sync_heartbeat_ms,
                commit_interval_ms: config.commit_interval_ms,
                sync_poll_interval_ms: config.sync_poll_interval_ms,
            },
            window: WindowConfig {
                window_width: config.window_width,
                window_height: config.window_height,
                window_pos_x: config.window_pos_x,
                window_pos_y: config.window_pos_y,
            },
            external: ExternalConfig {
                external_x: config.external_x,
                external_y: config.external_y,
                external_width: config.external_width,
                external_height: config.external_height,
            },
            editor: EditorConfig {
                autosave_secs: config.autosave_secs,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            keys: KeysConfig {
                key_toggle_play_pause: config.key_toggle_play_pause.clone(),
                key_speed_up: config.key_speed_up.clone(),
                key_slow_down: config.key_slow_down.clone(),
                key_reset: config.key_reset.clone(),
                key_toggle_mirror: config.key_toggle_mirror.clone(),
                key_toggle_editor: config.key_toggle_editor.clone(),
                key_toggle_fullscreen: config.key_toggle_fullscreen.clone(),
                key_close_panel: config.key_close_panel.clone(),
                key_next_cue: config.key_next_cue.clone(),
                key_prev_cue: config.key_prev_cue.clone(),
                key_external_display: config.key_external_display.clone(),
                key_safe_quit: config.key_safe_quit.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AppearanceConfig {
    #[serde(default = "defaults::default_font_size")]
    font_size: u32,
    #[serde(default = "defaults::default_line_spacing")]
    line_spacing: f32,
    #[serde(default = "defaults::default_margin_horizontal")]
    margin_horizontal: u16,
    #[serde(default)]
    mirrored: bool,
    #[serde(default)]
    sidebar_collapsed: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            font_size: defaults::default_font_size(),
            line_spacing: defaults::default_line_spacing(),
            margin_horizontal: defaults::default_margin_horizontal(),
            mirrored: false,
            sidebar_collapsed: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct CueConfig {
    #[serde(default = "defaults::default_cue_enabled")]
    cue_enabled: bool,
    #[serde(default = "defaults::default_cue_style")]
    cue_style: CueStyle,
    #[serde(default = "defaults::default_cue_position")]
    cue_position: u8,
    #[serde(default = "defaults::default_cue_color")]
    cue_color: String,
    #[serde(default = "defaults::default_cue_opacity")]
    cue_opacity: u8,
    #[serde(default = "defaults::default_cue_thickness")]
    cue_thickness: u8,
}

impl Default for CueConfig {
    fn default() -> Self {
        CueConfig {
            cue_enabled: defaults::default_cue_enabled(),
            cue_style: defaults::default_cue_style(),
            cue_position: defaults::default_cue_position(),
            cue_color: defaults::default_cue_color(),
            cue_opacity: defaults::default_cue_opacity(),
            cue_thickness: defaults::default_cue_thickness(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PlaybackConfig {
    #[serde(default = "defaults::default_speed")]
    default_speed: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            default_speed: defaults::default_speed(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct SyncConfig {
    #[serde(default = "defaults::default_sync_debounce_ms")]
    sync_debounce_ms: u64,
    #[serde(default = "defaults::default_sync_heartbeat_ms")]
    sync_heartbeat_ms: u64,
    #[serde(default = "defaults::default_commit_interval_ms")]
    commit_interval_ms: u64,
    #[serde(default = "defaults::default_sync_poll_interval_ms")]
    sync_poll_interval_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            sync_debounce_ms: defaults::default_sync_debounce_ms(),
            sync_heartbeat_ms: defaults::default_sync_heartbeat_ms(),
            commit_interval_ms: defaults::default_commit_interval_ms(),
            sync_poll_interval_ms: defaults::default_sync_poll_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    window_width: f32,
    #[serde(default = "defaults::default_window_height")]
    window_height: f32,
    #[serde(default)]
    window_pos_x: Option<f32>,
    #[serde(default)]
    window_pos_y: Option<f32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            window_width: defaults::default_window_width(),
            window_height: defaults::default_window_height(),
            window_pos_x: None,
            window_pos_y: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
struct ExternalConfig {
    #[serde(default)]
    external_x: Option<f32>,
    #[serde(default)]
    external_y: Option<f32>,
    #[serde(default)]
    external_width: Option<f32>,
    #[serde(default)]
    external_height: Option<f32>,
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct EditorConfig {
    #[serde(default = "defaults::default_autosave_secs")]
    autosave_secs: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            autosave_secs: defaults::default_autosave_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct KeysConfig {
    #[serde(default = "defaults::default_key_toggle_play_pause")]
    key_toggle_play_pause: String,
    #[serde(default = "defaults::default_key_speed_up")]
    key_speed_up: String,
    #[serde(default = "defaults::default_key_slow_down")]
    key_slow_down: String,
    #[serde(default = "defaults::default_key_reset")]
    key_reset: String,
    #[serde(default = "defaults::default_key_toggle_mirror")]
    key_toggle_mirror: String,
    #[serde(default = "defaults::default_key_toggle_editor")]
    key_toggle_editor: String,
    #[serde(default = "defaults::default_key_toggle_fullscreen")]
    key_toggle_fullscreen: String,
    #[serde(default = "defaults::default_key_close_panel")]
    key_close_panel: String,
    #[serde(default = "defaults::default_key_next_cue")]
    key_next_cue: String,
    #[serde(default = "defaults::default_key_prev_cue")]
    key_prev_cue: String,
    #[serde(default = "defaults::default_key_external_display")]
    key_external_display: String,
    #[serde(default = "defaults::default_key_safe_quit")]
    key_safe_quit: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        KeysConfig {
            key_toggle_play_pause: defaults::default_key_toggle_play_pause(),
            key_speed_up: defaults::default_key_speed_up(),
            key_slow_down: defaults::default_key_slow_down(),
            key_reset: defaults::default_key_reset(),
            key_toggle_mirror: defaults::default_key_toggle_mirror(),
            key_toggle_editor: defaults::default_key_toggle_editor(),
            key_toggle_fullscreen: defaults::default_key_toggle_fullscreen(),
            key_close_panel: defaults::default_key_close_panel(),
            key_next_cue: defaults::default_key_next_cue(),
            key_prev_cue: defaults::default_key_prev_cue(),
            key_external_display: defaults::default_key_external_display(),
            key_safe_quit: defaults::default_key_safe_quit(),
        }
    }
}
