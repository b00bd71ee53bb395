use super::models::AppConfig;
use super::tables::{ConfigTables, SECTION_NAMES};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Read the config file, falling back to defaults on any problem.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

/// Accepts the sectioned layout (`[appearance]`, `[cue]`, ...) or the flat one.
pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    let raw: toml::Table = toml::from_str(contents)?;
    let sectioned = SECTION_NAMES
        .iter()
        .any(|name| raw.get(*name).is_some_and(toml::Value::is_table));
    if sectioned {
        let tables: ConfigTables = toml::from_str(contents)?;
        Ok(tables.into())
    } else {
        toml::from_str::<AppConfig>(contents)
    }
}

pub fn serialize_config(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&ConfigTables::from(config))
}
