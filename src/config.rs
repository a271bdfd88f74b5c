//! Configuration loading
//!
//! Reads `~/.config/ghostwrite/config.toml`. A missing file is not an error;
//! an unreadable or invalid one falls back to defaults with a warning the
//! editor shows in its status bar.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub mod types;

pub use types::{CompletionConfig, Config, SanitizerConfig};

use crate::error::GhostwriteError;

const CONFIG_DIR: &str = "ghostwrite";
const CONFIG_FILE: &str = "config.toml";

/// Loaded configuration plus an optional warning for the user
#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_config() -> ConfigResult {
    match config_path() {
        Some(path) => load_config_from_path(&path),
        None => ConfigResult::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> ConfigResult {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return ConfigResult::default(),
        Err(e) => {
            let error = GhostwriteError::Io(e);
            log::warn!("Could not read {}: {}", path.display(), error);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Using default config: {}", error)),
            };
        }
    };

    match parse_config(&contents, path) {
        Ok(config) => ConfigResult {
            config,
            warning: None,
        },
        Err(error) => {
            log::warn!("{}", error);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Using default config: {}", error)),
            }
        }
    }
}

pub fn parse_config(contents: &str, path: &Path) -> Result<Config, GhostwriteError> {
    toml::from_str(contents).map_err(|e| GhostwriteError::InvalidConfig {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}
