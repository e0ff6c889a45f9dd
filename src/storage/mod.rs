pub mod config;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use config::{
    ClipboardBackendKind, Config, ConfigStorage, GeneralConfig, LoggingConfig, PasteToolKind,
    TomlConfigStorage,
};

/// Ensure XDG config and state directories exist
/// Returns (config_dir, state_dir)
///
/// XDG Base Directory Specification:
/// - Config: $XDG_CONFIG_HOME/clipstack (default: ~/.config/clipstack)
/// - State (logs): $XDG_STATE_HOME/clipstack (default: ~/.local/state/clipstack)
pub fn ensure_directories() -> Result<(PathBuf, PathBuf)> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    let home_path = PathBuf::from(home);

    let config_dir = if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("clipstack")
    } else {
        home_path.join(".config/clipstack")
    };

    let state_dir = if let Ok(xdg_state) = env::var("XDG_STATE_HOME") {
        PathBuf::from(xdg_state).join("clipstack")
    } else {
        home_path.join(".local/state/clipstack")
    };

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

    fs::create_dir_all(&state_dir)
        .with_context(|| format!("Failed to create state directory {:?}", state_dir))?;

    log::debug!("Config directory: {:?}", config_dir);
    log::debug!("State directory: {:?}", state_dir);

    Ok((config_dir, state_dir))
}
