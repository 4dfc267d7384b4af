//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including file naming conventions and environment variable names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Launchdeck";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "launchdeck";

/// Filename of the base configuration inside the config root.
pub const CONFIG_FILE: &str = "config.toml";

/// Filename of the pivot ledger inside the config root.
pub const LEDGER_FILE: &str = "pivot.toml";

/// Suffix a file must carry to be considered a profile overlay.
pub const PROFILE_SUFFIX: &str = ".profile.toml";

/// Subdirectory of the config root holding stowed (un-equipped) profiles.
pub const INVENTORY_DIR: &str = "inventory";

/// Display name of the synthetic entry representing the unmodified base config.
pub const BASE_PROFILE_NAME: &str = "Core";

/// Environment variable overriding the config root (used by tests and scripts).
pub const ENV_CONFIG_DIR: &str = "LAUNCHDECK_CONFIG_DIR";

/// Environment variable selecting a profile when no lock or override is present.
pub const ENV_PROFILE: &str = "LAUNCHDECK_PROFILE";

/// Environment variable controlling log filtering for the binary.
pub const ENV_LOG: &str = "LAUNCHDECK_LOG";
