//! CLI command handlers for Launchdeck.
//!
//! This module provides headless, scriptable access to the launcher's core
//! functionality for automation, testing, and shell integration.

pub mod common;
pub mod config;
pub mod inventory;
pub mod pivot;
pub mod profiles;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inventory::InventoryArgs;
pub use pivot::PivotArgs;
pub use profiles::ProfilesArgs;
