//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use launchdeck::constants::INVENTORY_DIR;

/// Path to the launchdeck binary under test.
pub fn launchdeck_bin() -> String {
    std::env::var("CARGO_BIN_EXE_launchdeck")
        .unwrap_or_else(|_| "target/debug/launchdeck".to_string())
}

/// Runs the binary against an isolated config directory.
pub fn run_isolated(args: &[&str], config_dir: &Path) -> Output {
    let mut cmd = Command::new(launchdeck_bin());
    cmd.env("LAUNCHDECK_CONFIG_DIR", config_dir);
    cmd.env_remove("LAUNCHDECK_PROFILE");
    cmd.args(args);
    cmd.output().expect("Failed to execute launchdeck binary")
}

/// Writes a profile overlay file into `dir`.
pub fn write_profile(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(format!("{name}.profile.toml"));
    fs::write(&path, content).unwrap();
    path
}

/// Writes a profile overlay file into the inventory subdirectory of `dir`.
pub fn write_stored_profile(dir: &Path, name: &str, content: &str) -> PathBuf {
    let inventory = dir.join(INVENTORY_DIR);
    fs::create_dir_all(&inventory).unwrap();
    write_profile(&inventory, name, content)
}

/// Writes a minimal valid base config into `dir`.
pub fn write_base_config(dir: &Path, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

/// Stdout of an output as a UTF-8 string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr of an output as a UTF-8 string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
