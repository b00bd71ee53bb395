use serde::{Deserialize, Serialize};

pub type ScriptId = String;

/// Slowest and fastest playback speed multipliers.
pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 10.0;
pub const SPEED_STEP: f32 = 0.5;
pub const DEFAULT_SPEED: f32 = 2.0;

pub const MIN_FONT_SIZE: u32 = 24;
pub const MAX_FONT_SIZE: u32 = 96;
pub const FONT_SIZE_STEP: u32 = 4;
pub const MIN_CUE_POSITION: u8 = 10;
pub const MAX_CUE_POSITION: u8 = 80;
pub const MIN_CUE_OPACITY: u8 = 20;
pub const MAX_CUE_OPACITY: u8 = 100;
pub const MIN_CUE_THICKNESS: u8 = 1;
pub const MAX_CUE_THICKNESS: u8 = 6;

pub const DEFAULT_SCRIPT_ID: &str = "1";
pub const SYNCED_SCRIPT_NAME: &str = "Synced Script";

const WELCOME_SCRIPT: &str = "Welcome to the teleprompter!

This is your reading surface.

>>>

SECTION 1: EXTERNAL DISPLAY

Drive a dedicated HDMI monitor from here.
1. Press X or use the external display button.
2. The borderless window opens on the configured monitor.

The text stays in sync with this window.

>>>

SECTION 2: EDITOR

Press E to open the editor.

Changes are saved automatically after a short pause.

>>>

SECTION 3: BASIC CONTROLS

Space: start or pause scrolling.
Up and Down arrows: adjust speed.
Mouse wheel: move the text back and forth.

>>>

SECTION 4: CUE POINTS

The marker lines between sections are cue points.
They split your text into chapters.

Use Page Up and Page Down to jump between them.

Have a good take!";

/// A named block of script text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub id: ScriptId,
    pub name: String,
    pub content: String,
    pub created_at_ms: u64,
}

impl Script {
    pub fn welcome(created_at_ms: u64) -> Self {
        Self {
            id: DEFAULT_SCRIPT_ID.to_string(),
            name: "Welcome".to_string(),
            content: WELCOME_SCRIPT.to_string(),
            created_at_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueDirection {
    Next,
    Prev,
}

/// One-shot navigation request. `request_id` is the de-duplication key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueAction {
    pub direction: CueDirection,
    pub request_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub speed: f32,
    pub scroll_position: f32,
    pub elapsed_time: u64,
    #[serde(default)]
    pub cue_action: Option<CueAction>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            speed: DEFAULT_SPEED,
            scroll_position: 0.0,
            elapsed_time: 0,
            cue_action: None,
        }
    }
}

impl PlaybackState {
    pub fn clamp_speed(speed: f32) -> f32 {
        if speed.is_finite() {
            speed.clamp(MIN_SPEED, MAX_SPEED)
        } else {
            DEFAULT_SPEED
        }
    }

    pub fn clamp_scroll(position: f32) -> f32 {
        if position.is_finite() {
            position.max(0.0)
        } else {
            0.0
        }
    }

    /// `mm:ss` label for the elapsed timer.
    pub fn elapsed_label(&self) -> String {
        let minutes = self.elapsed_time / 60;
        let seconds = self.elapsed_time % 60;
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Shape of the reading-line indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CueStyle {
    ArrowLeft,
    ArrowLeftLine,
    #[default]
    Full,
    LineArrowRight,
    ArrowRight,
    ArrowsOnly,
    LineOnly,
}

impl CueStyle {
    pub const ALL: [CueStyle; 7] = [
        CueStyle::ArrowLeft,
        CueStyle::ArrowLeftLine,
        CueStyle::Full,
        CueStyle::LineArrowRight,
        CueStyle::ArrowRight,
        CueStyle::ArrowsOnly,
        CueStyle::LineOnly,
    ];

    pub fn has_left_arrow(self) -> bool {
        matches!(
            self,
            CueStyle::ArrowLeft | CueStyle::ArrowLeftLine | CueStyle::Full | CueStyle::ArrowsOnly
        )
    }

    pub fn has_right_arrow(self) -> bool {
        matches!(
            self,
            CueStyle::Full | CueStyle::LineArrowRight | CueStyle::ArrowRight | CueStyle::ArrowsOnly
        )
    }

    pub fn has_line(self) -> bool {
        matches!(
            self,
            CueStyle::ArrowLeftLine | CueStyle::Full | CueStyle::LineArrowRight | CueStyle::LineOnly
        )
    }
}

impl std::fmt::Display for CueStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CueStyle::ArrowLeft => "Left arrow",
            CueStyle::ArrowLeftLine => "Left arrow + line",
            CueStyle::Full => "Arrows + line",
            CueStyle::LineArrowRight => "Line + right arrow",
            CueStyle::ArrowRight => "Right arrow",
            CueStyle::ArrowsOnly => "Arrows only",
            CueStyle::LineOnly => "Line only",
        };
        write!(f, "{}", label)
    }
}

/// Appearance and reading-line configuration, replicated wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub font_size: u32,
    pub mirrored: bool,
    pub cue_enabled: bool,
    pub cue_style: CueStyle,
    /// Percent from the top of the viewport.
    pub cue_position: u8,
    pub cue_color: String,
    pub cue_opacity: u8,
    pub cue_thickness: u8,
    pub sidebar_collapsed: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            font_size: 48,
            mirrored: false,
            cue_enabled: true,
            cue_style: CueStyle::Full,
            cue_position: 38,
            cue_color: "#30d158".to_string(),
            cue_opacity: 100,
            cue_thickness: 2,
            sidebar_collapsed: false,
        }
    }
}

impl AppSettings {
    /// Force every field into its accepted range.
    pub fn clamped(mut self) -> Self {
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.cue_position = self.cue_position.clamp(MIN_CUE_POSITION, MAX_CUE_POSITION);
        self.cue_opacity = self.cue_opacity.clamp(MIN_CUE_OPACITY, MAX_CUE_OPACITY);
        self.cue_thickness = self.cue_thickness.clamp(MIN_CUE_THICKNESS, MAX_CUE_THICKNESS);
        if parse_hex_color(&self.cue_color).is_none() {
            self.cue_color = AppSettings::default().cue_color;
        }
        self
    }

    pub fn cue_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.cue_color).unwrap_or([0x30, 0xd1, 0x58])
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into components.
pub fn parse_hex_color(raw: &str) -> Option<[u8; 3]> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors_with_and_without_hash() {
        assert_eq!(parse_hex_color("#30d158"), Some([0x30, 0xd1, 0x58]));
        assert_eq!(parse_hex_color("FFFFFF"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn clamped_settings_respect_ranges() {
        let settings = AppSettings {
            font_size: 400,
            cue_position: 0,
            cue_opacity: 5,
            cue_thickness: 40,
            cue_color: "green".to_string(),
            ..AppSettings::default()
        }
        .clamped();

        assert_eq!(settings.font_size, MAX_FONT_SIZE);
        assert_eq!(settings.cue_position, MIN_CUE_POSITION);
        assert_eq!(settings.cue_opacity, MIN_CUE_OPACITY);
        assert_eq!(settings.cue_thickness, MAX_CUE_THICKNESS);
        assert_eq!(settings.cue_color, "#30d158");
    }

    #[test]
    fn elapsed_label_pads_minutes_and_seconds() {
        let playback = PlaybackState {
            elapsed_time: 125,
            ..PlaybackState::default()
        };
        assert_eq!(playback.elapsed_label(), "02:05");
    }

    #[test]
    fn welcome_script_carries_cue_markers() {
        let script = Script::welcome(0);
        assert_eq!(script.id, DEFAULT_SCRIPT_ID);
        assert_eq!(script.content.matches(">>>").count(), 4);
    }
}
