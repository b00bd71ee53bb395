//! Configuration loading for the teleprompter.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the UI can still launch. The file is only read; the
//! running app never writes it back.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, LogLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use prompter_core::CueStyle;

    #[test]
    fn sectioned_config_maps_onto_flat_fields() {
        let config = parse_config(
            r##"
[appearance]
font_size = 64
mirrored = true

[cue]
cue_style = "line-only"
cue_color = "#0a84ff"

[sync]
sync_heartbeat_ms = 250

[external]
external_x = 1920.0
external_y = 0.0

[keys]
key_next_cue = "ctrl+n"
"##,
        )
        .expect("sectioned config parses");

        assert_eq!(config.font_size, 64);
        assert!(config.mirrored);
        assert_eq!(config.cue_style, CueStyle::LineOnly);
        assert_eq!(config.cue_color, "#0a84ff");
        assert_eq!(config.sync_heartbeat_ms, 250);
        assert_eq!(config.sync_debounce_ms, 16);
        assert_eq!(config.external_x, Some(1920.0));
        assert_eq!(config.key_next_cue, "ctrl+n");
        assert_eq!(config.key_prev_cue, "pageup");
    }

    #[test]
    fn flat_config_is_still_accepted() {
        let config = parse_config(
            r#"
font_size = 40
default_speed = 4.5
log_level = "info"
"#,
        )
        .expect("flat config parses");

        assert_eq!(config.font_size, 40);
        assert_eq!(config.default_speed, 4.5);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.cue_position, 38);
    }

    #[test]
    fn invalid_config_is_an_error_and_missing_file_falls_back() {
        assert!(parse_config("font_size = \"huge\"").is_err());
        assert!(parse_config("[cue]\ncue_style = \"zigzag\"").is_err());

        let config = load_config(std::path::Path::new("definitely/not/here.toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn initial_state_values_are_clamped() {
        let config = AppConfig {
            font_size: 200,
            cue_opacity: 0,
            default_speed: 99.0,
            ..AppConfig::default()
        };

        let settings = config.initial_settings();
        assert_eq!(settings.font_size, 96);
        assert_eq!(settings.cue_opacity, 20);
        assert_eq!(config.initial_playback().speed, 10.0);
    }

    #[test]
    fn serialized_defaults_use_sections() {
        let text = serialize_config(&AppConfig::default()).expect("serialize defaults");
        assert!(text.contains("[appearance]"));
        assert!(text.contains("[keys]"));
        assert_eq!(
            parse_config(&text).expect("reparse defaults"),
            AppConfig::default()
        );
    }
}
