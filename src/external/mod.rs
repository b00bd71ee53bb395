//! The external display runs as a second copy of this binary.
//!
//! The primary spawns it through [`host::ProcessWindowHost`] and writes one
//! JSON command per line to its stdin; the child turns those lines into iced
//! messages through [`inbox::display_inbox`].

pub mod host;
pub mod inbox;

pub use host::ProcessWindowHost;
pub use inbox::{InboxEvent, display_inbox};

/// Where the external display window should appear.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayPlacement {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl DisplayPlacement {
    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self {
            x: config.external_x,
            y: config.external_y,
            width: config.external_width,
            height: config.external_height,
        }
    }

    /// Arguments understood by the `--external-display` entry point.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (flag, value) in [
            ("--x", self.x),
            ("--y", self.y),
            ("--width", self.width),
            ("--height", self.height),
        ] {
            if let Some(value) = value {
                args.push(flag.to_string());
                args.push(value.to_string());
            }
        }
        args
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        Some((self.x?, self.y?))
    }
}
