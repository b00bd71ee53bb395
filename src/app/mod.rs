mod canvas;
mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::external::{DisplayPlacement, ProcessWindowHost};
use iced::{Point, Size, Theme, window};
use std::path::PathBuf;

/// Launch the operator window. `config_path` is handed to the external
/// display so both processes read the same settings.
pub fn run_primary(config: AppConfig, config_path: PathBuf) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        position: match (config.window_pos_x, config.window_pos_y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => {
                window::Position::Specific(Point::new(x, y))
            }
            _ => window::Position::Default,
        },
        exit_on_close_request: false,
        ..window::Settings::default()
    };
    let host = ProcessWindowHost::new(DisplayPlacement::from_config(&config), Some(config_path));

    iced::application("Teleprompter", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|_| Theme::Dark)
        .run_with(move || App::bootstrap(config, Box::new(host)))
}

/// Launch the borderless external display.
pub fn run_external(config: AppConfig, placement: DisplayPlacement) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(
            placement.width.unwrap_or(config.window_width),
            placement.height.unwrap_or(config.window_height),
        ),
        position: match placement.position() {
            Some((x, y)) if x.is_finite() && y.is_finite() => {
                window::Position::Specific(Point::new(x, y))
            }
            _ => window::Position::Default,
        },
        decorations: false,
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application("Teleprompter Display", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|_| Theme::Dark)
        .run_with(move || App::bootstrap_external(config))
}
