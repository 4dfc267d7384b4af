//! Profile discovery and naming.
//!
//! Scans a directory for `*.profile.toml` overlay files and classifies each
//! as valid or broken. Discovery is a pure read: per-file failures are
//! returned as data for the caller to surface, never raised.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants::PROFILE_SUFFIX;
use crate::models::{ProfileInfo, ProfileOverlay, ProfileParseError};

/// Reason attached to a profile file with no content.
pub const REASON_EMPTY_FILE: &str = "empty profile file";

/// Reason attached to an overlay with zero fields set.
pub const REASON_NO_SETTINGS: &str = "no settings found";

/// Whether a filename follows the profile-file suffix convention.
#[must_use]
pub fn is_profile_file(file_name: &str) -> bool {
    canonical_name(file_name).is_some()
}

/// Canonical profile name: the filename with the suffix stripped, original
/// casing preserved. Returns `None` for filenames outside the convention.
///
/// The suffix match is ASCII case-insensitive; the stem must be non-empty.
#[must_use]
pub fn canonical_name(file_name: &str) -> Option<&str> {
    let split = file_name.len().checked_sub(PROFILE_SUFFIX.len())?;
    if split == 0 {
        return None;
    }
    let tail = file_name.get(split..)?;
    if !tail.eq_ignore_ascii_case(PROFILE_SUFFIX) {
        return None;
    }
    Some(&file_name[..split])
}

/// Normalizes a profile name for comparison: trims whitespace, strips the
/// profile suffix if the caller passed a filename, and case-folds.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = canonical_name(trimmed).unwrap_or(trimmed);
    stripped.to_lowercase()
}

/// Profile file discovery.
pub struct ProfileStore;

impl ProfileStore {
    /// Scans `dir` (non-recursively) for profile overlay files.
    ///
    /// Valid entries come back sorted by name, case-insensitively. Broken
    /// entries carry the failure reason for user notification. The synthetic
    /// base entry is the caller's responsibility, not this function's.
    pub fn discover(dir: &Path) -> Result<(Vec<ProfileInfo>, Vec<ProfileParseError>)> {
        let mut profiles = Vec::new();
        let mut broken = Vec::new();

        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read profile directory: {}", dir.display()))?;

        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(name) = canonical_name(file_name) else {
                continue;
            };
            let name = name.to_string();

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    broken.push(ProfileParseError::new(name, path, err.to_string()));
                    continue;
                }
            };

            if content.trim().is_empty() {
                broken.push(ProfileParseError::new(name, path, REASON_EMPTY_FILE));
                continue;
            }

            let overlay: ProfileOverlay = match toml::from_str(&content) {
                Ok(overlay) => overlay,
                Err(err) => {
                    broken.push(ProfileParseError::new(name, path, err.to_string()));
                    continue;
                }
            };

            if overlay.is_empty() {
                broken.push(ProfileParseError::new(name, path, REASON_NO_SETTINGS));
                continue;
            }

            profiles.push(ProfileInfo::new(name, path, overlay));
        }

        profiles.sort_by_key(|p| p.name.to_lowercase());

        Ok((profiles, broken))
    }
}
