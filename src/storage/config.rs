use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which clipboard backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackendKind {
    #[default]
    Auto,
    Wayland,
    Arboard,
}

/// Which tool sends the synthetic paste keystroke
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteToolKind {
    #[default]
    Auto,
    Wtype,
    Xdotool,
}

/// General configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// How often the clipboard is polled
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Delay between writing the clipboard and sending the paste keystroke
    #[serde(default = "default_paste_delay_ms")]
    pub paste_delay_ms: u64,

    /// Delay between the global shortcut and opening the selector
    #[serde(default = "default_hotkey_delay_ms")]
    pub hotkey_delay_ms: u64,

    #[serde(default)]
    pub clipboard_backend: ClipboardBackendKind,

    #[serde(default)]
    pub paste_tool: PasteToolKind,

    /// Keyboard device for the global shortcut (default: first /dev/input/by-path/*-event-kbd)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard_device: Option<PathBuf>,
}

impl GeneralConfig {
    pub fn poll_interval(&self) -> Duration {
        // A zero period would spin the poll timer
        Duration::from_millis(self.poll_interval_ms.max(50))
    }

    pub fn paste_delay(&self) -> Duration {
        Duration::from_millis(self.paste_delay_ms)
    }

    pub fn hotkey_delay(&self) -> Duration {
        Duration::from_millis(self.hotkey_delay_ms)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            poll_interval_ms: default_poll_interval_ms(),
            paste_delay_ms: default_paste_delay_ms(),
            hotkey_delay_ms: default_hotkey_delay_ms(),
            clipboard_backend: ClipboardBackendKind::default(),
            paste_tool: PasteToolKind::default(),
            keyboard_device: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level written to the log file
    #[serde(default = "default_file_level")]
    pub file_level: String,

    /// Level shown as flash messages in the status bar
    #[serde(default = "default_flash_level")]
    pub flash_level: String,

    /// How long a flash message stays visible
    #[serde(default = "default_flash_message_duration_ms")]
    pub flash_message_duration_ms: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file_level: default_file_level(),
            flash_level: default_flash_level(),
            flash_message_duration_ms: default_flash_message_duration_ms(),
        }
    }
}

// Default value functions for serde
fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_paste_delay_ms() -> u64 {
    crate::clipboard::DEFAULT_PASTE_DELAY.as_millis() as u64
}

fn default_hotkey_delay_ms() -> u64 {
    50
}

fn default_file_level() -> String {
    "info".to_string()
}

fn default_flash_level() -> String {
    "warn".to_string()
}

fn default_flash_message_duration_ms() -> u64 {
    4000
}

/// Trait for configuration storage
pub trait ConfigStorage: Send + Sync {
    /// Load configuration from file
    fn load(&self) -> Result<Config>;

    /// Save configuration to file
    fn save(&self, config: &Config) -> Result<()>;

    /// Get the config file path
    fn path(&self) -> &PathBuf;

    /// Create default configuration file if it doesn't exist
    fn create_default(&self) -> Result<()>;
}

/// TOML-based implementation of ConfigStorage
pub struct TomlConfigStorage {
    path: PathBuf,
}

impl TomlConfigStorage {
    /// Create a new TomlConfigStorage with the given path
    pub fn new(path: PathBuf) -> Self {
        TomlConfigStorage { path }
    }
}

impl ConfigStorage for TomlConfigStorage {
    fn load(&self) -> Result<Config> {
        // If file doesn't exist, create default and return it
        if !self.path.exists() {
            log::info!(
                "Config file not found at {:?}, creating default configuration",
                self.path
            );
            self.create_default()?;
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {:?}", self.path))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", self.path))?;

        log::info!("Loaded configuration from {:?}", self.path);
        log::debug!(
            "Config: poll={}ms paste_delay={}ms backend={:?} paste_tool={:?}",
            config.general.poll_interval_ms,
            config.general.paste_delay_ms,
            config.general.clipboard_backend,
            config.general.paste_tool
        );

        Ok(config)
    }

    fn save(&self, config: &Config) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(config).with_context(|| "Failed to serialize configuration")?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        fs::write(&self.path, toml_str)
            .with_context(|| format!("Failed to write config to {:?}", self.path))?;

        log::debug!("Saved configuration to {:?}", self.path);

        Ok(())
    }

    fn path(&self) -> &PathBuf {
        &self.path
    }

    fn create_default(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        // Use the example config compiled into the binary
        let example_config = include_str!("../../clipstack.toml.example");

        fs::write(&self.path, example_config)
            .with_context(|| format!("Failed to create default config at {:?}", self.path))?;

        log::info!("Created default configuration at {:?}", self.path);

        Ok(())
    }
}
