//! Base configuration management.
//!
//! This module handles loading, validating, and saving the launcher's base
//! configuration in TOML format with platform-specific directory resolution.
//! Factory defaults, field backfilling, and grid clamping live here; merging
//! a profile overlay on top of a base config is `services::overlay`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE, ENV_CONFIG_DIR};
use crate::models::Command;

/// Smallest allowed grid dimension.
pub const GRID_MIN: i64 = 1;
/// Largest allowed grid dimension.
pub const GRID_MAX: i64 = 9;

/// Key bindings for the launcher's interactive surface.
///
/// Empty strings mean "not configured" and are backfilled from the factory
/// defaults by [`Config::apply_field_defaults`], so configs written before a
/// binding existed keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyBindings {
    /// Run the selected command
    #[serde(default)]
    pub run: String,
    /// Reload configuration and profiles from disk
    #[serde(default)]
    pub reload: String,
    /// Toggle the pivot lock on the active profile
    #[serde(default)]
    pub pivot: String,
    /// Open the profile inventory
    #[serde(default)]
    pub inventory: String,
    /// Quit the launcher
    #[serde(default)]
    pub quit: String,
}

impl KeyBindings {
    /// Factory key bindings.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            run: "enter".to_string(),
            reload: "r".to_string(),
            pivot: "p".to_string(),
            inventory: "i".to_string(),
            quit: "q".to_string(),
        }
    }
}

/// The full, concrete launcher configuration.
///
/// # File Location
///
/// - Linux: `~/.config/launchdeck/config.toml`
/// - macOS: `~/Library/Application Support/launchdeck/config.toml`
/// - Windows: `%APPDATA%\launchdeck\config.toml`
///
/// The `LAUNCHDECK_CONFIG_DIR` environment variable overrides the directory.
///
/// Every resolution step copies this by value; the base and effective
/// configurations never alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Grid width in columns, clamped to [1, 9]
    #[serde(default = "default_grid_dim")]
    pub x: i64,
    /// Grid height in rows, clamped to [1, 9]
    #[serde(default = "default_grid_dim")]
    pub y: i64,
    /// Shell used to execute command strings
    #[serde(default)]
    pub shell: String,
    /// Name of the color theme
    #[serde(default)]
    pub theme: String,
    /// Profile selected on startup when no override, lock, or env var applies
    #[serde(default)]
    pub profile: String,
    /// Custom header art rendered above the grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Default for closing the command pane when a command exits
    #[serde(default = "default_auto_close")]
    pub auto_close: bool,
    /// Default for echoing the resolved command line before execution
    #[serde(default)]
    pub debug: bool,
    /// Key bindings
    #[serde(default)]
    pub keys: KeyBindings,
    /// Command grid definitions
    #[serde(default)]
    pub commands: Vec<Command>,
}

fn default_grid_dim() -> i64 {
    3
}

fn default_auto_close() -> bool {
    true
}

impl Config {
    /// Canonical factory configuration.
    ///
    /// This is the rescue configuration used whenever resolution cannot
    /// trust user-provided state, so it must never depend on anything read
    /// from disk.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            x: default_grid_dim(),
            y: default_grid_dim(),
            shell: "bash".to_string(),
            theme: "core".to_string(),
            profile: String::new(),
            header: None,
            auto_close: default_auto_close(),
            debug: false,
            keys: KeyBindings::defaults(),
            commands: Vec::new(),
        }
    }

    /// Fills any still-empty scalar fields from the factory defaults.
    ///
    /// Used after loading a raw base configuration that may predate newer
    /// fields. Grid dimensions are handled by [`Config::clamp`], not here.
    pub fn apply_field_defaults(&mut self) {
        let defaults = Self::defaults();

        if self.shell.trim().is_empty() {
            self.shell = defaults.shell;
        }
        if self.theme.trim().is_empty() {
            self.theme = defaults.theme;
        }
        if self.keys.run.is_empty() {
            self.keys.run = defaults.keys.run;
        }
        if self.keys.reload.is_empty() {
            self.keys.reload = defaults.keys.reload;
        }
        if self.keys.pivot.is_empty() {
            self.keys.pivot = defaults.keys.pivot;
        }
        if self.keys.inventory.is_empty() {
            self.keys.inventory = defaults.keys.inventory;
        }
        if self.keys.quit.is_empty() {
            self.keys.quit = defaults.keys.quit;
        }
    }

    /// Forces the grid dimensions into `[1, 9]`.
    ///
    /// Idempotent; called after every merge and every raw load.
    pub fn clamp(&mut self) {
        self.x = self.x.clamp(GRID_MIN, GRID_MAX);
        self.y = self.y.clamp(GRID_MIN, GRID_MAX);
    }

    /// Gets the platform-specific config directory path.
    ///
    /// Honors the `LAUNCHDECK_CONFIG_DIR` environment variable so tests and
    /// scripts can run against an isolated directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("launchdeck");

        Ok(config_dir)
    }

    /// Full path of the base configuration file inside `dir`.
    #[must_use]
    pub fn file_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Checks if the base configuration file exists inside `dir`.
    #[must_use]
    pub fn exists_in(dir: &Path) -> bool {
        Self::file_path(dir).exists()
    }

    /// Loads the base configuration from `dir`.
    ///
    /// Read and parse errors propagate; the resolver decides whether to
    /// degrade to factory defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = Self::file_path(dir);

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read config file: {}", config_path.display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse config file: {}", config_path.display())
        })?;

        Ok(config)
    }

    /// Saves the configuration to `dir` using an atomic write.
    ///
    /// Uses the temp file + rename pattern so the file is never left in a
    /// half-written state.
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).with_context(|| {
            format!("Failed to create config directory: {}", dir.display())
        })?;

        let content =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::file_path(dir);
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, &config_path).with_context(|| {
            format!(
                "Failed to rename temp config file to: {}",
                config_path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}
