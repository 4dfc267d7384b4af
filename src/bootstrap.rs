//! First-run provisioning.
//!
//! When no base configuration exists yet, materialize the config root with a
//! starter configuration the user can edit immediately. The starter content
//! is deliberately a plain TOML string rather than a serialized
//! [`crate::config::Config`], so it can carry comments.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::Config;
use crate::constants::INVENTORY_DIR;

/// Starter base configuration written on first run.
const STARTER_CONFIG: &str = r#"# Launchdeck base configuration.
# Profiles (<name>.profile.toml next to this file) override these values.

x = 3
y = 3
shell = "bash"
theme = "core"

[[commands]]
name = "Logs"
exec = "journalctl --user -f"
row = 1
col = "a"

[[commands]]
name = "Processes"
exec = "htop"
row = 1
col = "b"
auto_close = false

[[commands]]
name = "Disk"
exec = "df -h"
row = 1
col = "z"
"#;

/// Creates the config root and starter files when the base configuration is
/// missing.
///
/// Returns `true` when provisioning happened. An uncreatable config root is
/// the one fatal error of the whole engine: without a writable location
/// there is no safe default to degrade to.
pub fn provision(dir: &Path) -> Result<bool> {
    if Config::exists_in(dir) {
        return Ok(false);
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    fs::create_dir_all(dir.join(INVENTORY_DIR)).with_context(|| {
        format!("Failed to create inventory directory under: {}", dir.display())
    })?;

    let config_path = Config::file_path(dir);
    fs::write(&config_path, STARTER_CONFIG).with_context(|| {
        format!("Failed to write starter config: {}", config_path.display())
    })?;

    debug!(dir = %dir.display(), "provisioned config root");
    Ok(true)
}
