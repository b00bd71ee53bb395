use iced::Color;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Reading-line colour presets offered in the settings panel.
pub(crate) const CUE_COLOR_PRESETS: [&str; 8] = [
    "#30d158", "#0a84ff", "#ff453a", "#ff9f0a", "#ffd60a", "#bf5af2", "#ff375f", "#ffffff",
];

pub(crate) const SIDEBAR_WIDTH: f32 = 260.0;
pub(crate) const SETTINGS_PANEL_WIDTH: f32 = 300.0;
pub(crate) const CONTROL_BAR_HEIGHT: f32 = 56.0;
pub(crate) const PROGRESS_BAR_HEIGHT: f32 = 4.0;
pub(crate) const CUE_ARROW_WIDTH: f32 = 18.0;
pub(crate) const CUE_ARROW_HEIGHT: f32 = 22.0;
pub(crate) const CUE_ARROW_INSET: f32 = 8.0;
/// Pixels per wheel "line" when the platform reports lines.
pub(crate) const WHEEL_LINE_PX: f32 = 100.0;

pub(crate) const SIGNAL_POLL_INTERVAL: Duration = Duration::from_millis(250);
pub(crate) const ELAPSED_TICK_INTERVAL: Duration = Duration::from_secs(1);
pub(crate) const AUTOSAVE_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub(crate) static SURFACE_BACKGROUND: Lazy<Color> = Lazy::new(|| Color::from_rgb8(0, 0, 0));
pub(crate) static SURFACE_TEXT: Lazy<Color> = Lazy::new(|| Color::from_rgb8(0xf5, 0xf5, 0xf7));
pub(crate) static MARKER_TEXT: Lazy<Color> = Lazy::new(|| Color::from_rgb8(0x8e, 0x8e, 0x93));
pub(crate) static PROGRESS_TRACK: Lazy<Color> = Lazy::new(|| Color::from_rgb8(0x2c, 0x2c, 0x2e));
