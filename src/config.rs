use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages::Locale;

pub const CONFIG_ENV: &str = "TASKFORM_CONFIG";
pub const LOCALE_ENV: &str = "TASKFORM_LOCALE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// How accepted records are printed by `add`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// User settings. Every key is optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub locale: Locale,
    pub output: OutputFormat,
}

/// Returns the path to the config file (`config.toml`).
///
/// The path is determined in the following order:
/// 1. `TASKFORM_CONFIG` environment variable.
/// 2. `~/.config/taskform/config.toml` (on Linux).
/// 3. `./config.toml` (fallback).
pub fn config_path() -> PathBuf {
    std::env::var(CONFIG_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskform");
        p.push("config.toml");
        p
    })
}

impl Config {
    /// Loads the config file and applies the `TASKFORM_LOCALE` override.
    ///
    /// A missing file yields the defaults. The file is never created.
    pub fn load() -> Result<Config, ConfigError> {
        let mut config = Config::load_from(&config_path())?;
        if let Ok(value) = std::env::var(LOCALE_ENV) {
            match value.parse::<Locale>() {
                Ok(locale) => {
                    debug!("{} overrides locale with {}", LOCALE_ENV, locale);
                    config.locale = locale;
                }
                Err(e) => warn!("Ignoring {}: {}", LOCALE_ENV, e),
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&s).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
