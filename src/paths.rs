use anyhow::{Context, Result};
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "SYSTRAY_BRIDGE_CONFIG";

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .context("Could not determine config directory")
        .map(|p| p.join("systray-bridge"))
}

/// `$SYSTRAY_BRIDGE_CONFIG` if set, otherwise `config.json` in the config dir.
pub fn config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => config_dir().map(|p| p.join("config.json")),
    }
}
