use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::CONFIG_FILE;
use crate::error::{ErrorContext, FixVersionError, FixVersionResult};

/// Saved defaults, read from `~/.jira-fix-version.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub project_name: Option<String>,
}

pub fn config_path() -> FixVersionResult<PathBuf> {
    // Lets tests and CI point at a throwaway file
    if let Ok(path) = env::var("JIRA_FIX_VERSION_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    let home_dir = dirs::home_dir().context("Could not find home directory")?;
    Ok(home_dir.join(CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> FixVersionResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let config_str = fs::read_to_string(path)?;
    serde_json::from_str(&config_str).map_err(|e| {
        FixVersionError::ConfigError(format!("Failed to parse {}: {}", path.display(), e))
    })
}

pub fn load_config() -> FixVersionResult<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> FixVersionResult<()> {
    let config_str = serde_json::to_string_pretty(config)?;
    fs::write(path, config_str)?;
    Ok(())
}

pub fn save_config(config: &Config) -> FixVersionResult<()> {
    save_config_to(config, &config_path()?)
}
