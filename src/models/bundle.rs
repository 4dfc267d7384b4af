//! The resolved configuration snapshot handed to the presentation layer.

use std::path::PathBuf;

use crate::config::Config;
use crate::models::{ProfileInfo, ProfileParseError, Theme};

/// Everything the presentation layer needs after one resolution pass.
///
/// # Invariants
///
/// - `profiles` always contains at least one entry (the synthetic base
///   entry when nothing else is discovered)
/// - `0 <= active_index < profiles.len()`
/// - `locked_name` is empty unless the pivot lock resolved to a discovered
///   profile during this pass
///
/// Bundles are recomputed fully on every load, reload, or profile switch;
/// they are never mutated field-by-field by external code.
#[derive(Debug, Clone)]
pub struct ConfigBundle {
    /// The raw base configuration (clamped, field defaults applied)
    pub base: Config,
    /// The effective configuration after overlay merging and fallbacks
    pub config: Config,
    /// Ordered profile list, synthetic base entry included
    pub profiles: Vec<ProfileInfo>,
    /// Index of the active profile within `profiles`
    pub active_index: usize,
    /// Config root the bundle was resolved from
    pub config_dir: PathBuf,
    /// Display name of the still-valid pivot lock, or empty
    pub locked_name: String,
    /// Profiles that failed to load, queued for user acknowledgment
    pub broken: Vec<ProfileParseError>,
    /// Palette resolved from the effective configuration's theme name
    pub theme: Theme,
}

impl ConfigBundle {
    /// The currently active profile entry.
    #[must_use]
    pub fn active_profile(&self) -> &ProfileInfo {
        &self.profiles[self.active_index]
    }

    /// Whether the synthetic base entry is the active profile.
    #[must_use]
    pub fn is_base_active(&self) -> bool {
        self.active_index == 0
    }

    /// Whether a pivot lock survived resolution.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        !self.locked_name.is_empty()
    }
}
