//! Entry point for the teleprompter.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` (or `--config`).
//! - Launch either the primary window or, when started by the primary with
//!   `--external-display`, the borderless external display.

mod app;
mod config;
mod external;
mod file_io;

use crate::config::{load_config, serialize_config};
use crate::external::DisplayPlacement;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";
pub(crate) const EXTERNAL_DISPLAY_FLAG: &str = "--external-display";

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Clears and returns the Ctrl+C flag.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::AcqRel)
}

#[derive(Debug, Clone, PartialEq)]
enum LaunchMode {
    Primary,
    External(DisplayPlacement),
    PrintConfig,
}

#[derive(Debug, Clone, PartialEq)]
struct LaunchArgs {
    config_path: PathBuf,
    mode: LaunchMode,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = load_config(&args.config_path);

    if args.mode == LaunchMode::PrintConfig {
        let text = serialize_config(&config).context("Failed to serialize configuration")?;
        println!("{text}");
        return Ok(());
    }

    set_log_level(reload_handle, config.log_level.as_filter_str());
    install_sigint_handler();

    match args.mode {
        LaunchMode::External(placement) => {
            info!(
                x = ?placement.x,
                y = ?placement.y,
                level = %config.log_level,
                "Starting external display"
            );
            app::run_external(config, placement).context("Failed to start the external display")
        }
        _ => {
            info!(
                path = %args.config_path.display(),
                level = %config.log_level,
                speed = config.default_speed,
                "Starting teleprompter"
            );
            app::run_primary(config, args.config_path).context("Failed to start the GUI")
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<LaunchArgs> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut external = false;
    let mut print_config = false;
    let mut placement = DisplayPlacement::default();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow!("Usage: prompter [--config <path>]"))?;
                config_path = PathBuf::from(path);
            }
            "--print-default-config" => print_config = true,
            EXTERNAL_DISPLAY_FLAG => external = true,
            "--x" => placement.x = Some(parse_coordinate(&arg, args.next())?),
            "--y" => placement.y = Some(parse_coordinate(&arg, args.next())?),
            "--width" => placement.width = Some(parse_coordinate(&arg, args.next())?),
            "--height" => placement.height = Some(parse_coordinate(&arg, args.next())?),
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
    }

    let mode = if print_config {
        LaunchMode::PrintConfig
    } else if external {
        LaunchMode::External(placement)
    } else {
        LaunchMode::Primary
    };
    Ok(LaunchArgs { config_path, mode })
}

fn parse_coordinate(flag: &str, value: Option<String>) -> Result<f32> {
    let value = value.ok_or_else(|| anyhow!("Missing value for {flag}"))?;
    let parsed: f32 = value
        .parse()
        .with_context(|| format!("Invalid value for {flag}: {value}"))?;
    if !parsed.is_finite() {
        return Err(anyhow!("Invalid value for {flag}: {value}"));
    }
    Ok(parsed)
}

fn install_sigint_handler() {
    if let Err(err) = ctrlc::set_handler(|| SIGINT_REQUESTED.store(true, Ordering::Release)) {
        warn!("Failed to install Ctrl+C handler: {err}");
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if env::var_os("RUST_LOG").is_some() {
        info!(%level, "RUST_LOG is set; keeping environment filter");
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_launch_the_primary_window() {
        let parsed = parse_args(args(&[])).expect("empty args");
        assert_eq!(parsed.mode, LaunchMode::Primary);
        assert_eq!(parsed.config_path, PathBuf::from(DEFAULT_CONFIG_PATH));
    }

    #[test]
    fn external_display_flag_carries_placement() {
        let parsed = parse_args(args(&[
            "--config",
            "alt.toml",
            "--external-display",
            "--x",
            "1920",
            "--y",
            "0",
        ]))
        .expect("external args");

        assert_eq!(parsed.config_path, PathBuf::from("alt.toml"));
        assert_eq!(
            parsed.mode,
            LaunchMode::External(DisplayPlacement {
                x: Some(1920.0),
                y: Some(0.0),
                width: None,
                height: None,
            })
        );
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        assert!(parse_args(args(&["--external-display", "--x", "left"])).is_err());
        assert!(parse_args(args(&["--external-display", "--y"])).is_err());
        assert!(parse_args(args(&["--config"])).is_err());
    }
}
