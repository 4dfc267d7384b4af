//! Configuration resolution orchestration.
//!
//! Pulls together first-run provisioning, the pivot ledger, profile
//! discovery, and overlay merging into one synchronous pass that always
//! produces a usable [`ConfigBundle`]. Every file-system or parse failure
//! inside the pass degrades to a safe default; the only fatal error is a
//! config root that cannot be created.

use anyhow::{bail, Result};
use std::path::Path;
use tracing::{debug, warn};

use crate::bootstrap;
use crate::config::Config;
use crate::constants::{BASE_PROFILE_NAME, ENV_PROFILE};
use crate::models::{ConfigBundle, ProfileInfo, ProfileOverlay, Theme};
use crate::services::ledger::PivotLedger;
use crate::services::overlay::OverlayResolver;
use crate::services::profiles::{normalize_name, ProfileStore};

/// Where the resolved target profile name came from, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetSource {
    /// Explicit caller override
    Override,
    /// Pivot lock from the ledger
    Lock,
    /// `LAUNCHDECK_PROFILE` environment variable
    Environment,
    /// The base configuration's own `profile` field
    BaseConfig,
}

/// Resolution orchestrator.
pub struct ConfigResolver;

impl ConfigResolver {
    /// Resolves the full configuration bundle for `dir`.
    ///
    /// `profile_override` is the explicit programmatic selection and beats
    /// the pivot lock, the environment, and the base config's own profile
    /// field.
    pub fn resolve(dir: &Path, profile_override: Option<&str>) -> Result<ConfigBundle> {
        // First-run provisioning; an uncreatable config root is fatal.
        bootstrap::provision(dir)?;

        let ledger = PivotLedger::read(dir);
        let requested_pivot = ledger.locked.trim().to_string();

        let mut base = match Config::load_from(dir) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "unusable base config, using factory defaults");
                Config::defaults()
            }
        };
        base.apply_field_defaults();
        base.clamp();

        let (discovered, broken) = match ProfileStore::discover(dir) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "profile discovery failed, continuing without profiles");
                (Vec::new(), Vec::new())
            }
        };

        let mut profiles = Vec::with_capacity(discovered.len() + 1);
        profiles.push(base_entry(dir));
        profiles.extend(discovered);
        if !ledger.equipped_order.is_empty() {
            reorder_equipped(&mut profiles, &ledger.equipped_order);
        }

        let target = select_target(profile_override, &requested_pivot, &base);

        let mut active_index = 0;
        let mut use_factory_defaults = false;
        let mut lock_valid = !requested_pivot.is_empty()
            && find_profile(&profiles, &requested_pivot).is_some();

        if let Some((name, source)) = target {
            match find_profile(&profiles, &name) {
                Some(index) => active_index = index,
                None => {
                    use_factory_defaults = true;
                    if source == TargetSource::Lock {
                        // A stale lock would fail again on every future
                        // load; clear it now rather than looping.
                        warn!(profile = %name, "pivot lock points at a missing profile, clearing");
                        if let Err(err) = PivotLedger::clear_lock(dir) {
                            warn!(%err, "failed to clear stale pivot lock");
                        }
                        lock_valid = false;
                    }
                }
            }
        }

        let mut config = effective_config(
            &base,
            &profiles,
            active_index,
            !broken.is_empty(),
            use_factory_defaults,
        );
        config.clamp();

        let locked_name = if lock_valid {
            find_profile(&profiles, &requested_pivot)
                .map(|index| profiles[index].name.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };

        let theme = Theme::resolve(&config.theme);

        Ok(ConfigBundle {
            base,
            config,
            profiles,
            active_index,
            config_dir: dir.to_path_buf(),
            locked_name,
            broken,
            theme,
        })
    }

    /// Recomputes the bundle for a caller-chosen profile index.
    ///
    /// Used by the presentation layer for direct switches and cycling; the
    /// merge runs synchronously against the bundle's base config, without
    /// touching the file system.
    pub fn switch_profile(bundle: &ConfigBundle, index: usize) -> Result<ConfigBundle> {
        if index >= bundle.profiles.len() {
            bail!(
                "profile index {} out of range (have {})",
                index,
                bundle.profiles.len()
            );
        }

        let mut config = effective_config(
            &bundle.base,
            &bundle.profiles,
            index,
            !bundle.broken.is_empty(),
            false,
        );
        config.clamp();
        let theme = Theme::resolve(&config.theme);

        let mut next = bundle.clone();
        next.config = config;
        next.active_index = index;
        next.theme = theme;
        Ok(next)
    }

    /// Index reached by stepping `delta` profiles from the active one, with
    /// wraparound.
    #[must_use]
    pub fn cycle_index(bundle: &ConfigBundle, delta: isize) -> usize {
        let len = bundle.profiles.len() as isize;
        let next = (bundle.active_index as isize + delta).rem_euclid(len);
        next as usize
    }
}

/// The synthetic zeroth entry representing the unmodified base config.
fn base_entry(dir: &Path) -> ProfileInfo {
    ProfileInfo::new(
        BASE_PROFILE_NAME,
        Config::file_path(dir),
        ProfileOverlay::default(),
    )
}

/// Applies the persisted equipped order to the profile list.
///
/// The synthetic base entry stays pinned at index 0. Order entries that no
/// longer exist are dropped silently; discovered profiles the order does not
/// mention keep their alphabetical order and are appended after the listed
/// ones.
fn reorder_equipped(profiles: &mut Vec<ProfileInfo>, order: &[String]) {
    let base = profiles.remove(0);
    let mut rest = std::mem::take(profiles);
    let mut reordered = Vec::with_capacity(rest.len() + 1);

    for wanted in order {
        let wanted = normalize_name(wanted);
        if wanted.is_empty() || wanted == normalize_name(BASE_PROFILE_NAME) {
            continue;
        }
        if let Some(pos) = rest.iter().position(|p| normalize_name(&p.name) == wanted) {
            reordered.push(rest.remove(pos));
        } else {
            debug!(profile = %wanted, "equipped order names a missing profile, dropping");
        }
    }

    // Leftovers were sorted alphabetically by discovery and stay that way.
    reordered.append(&mut rest);

    profiles.push(base);
    profiles.append(&mut reordered);
}

/// Determines the target profile name by precedence, together with where it
/// came from.
fn select_target(
    profile_override: Option<&str>,
    requested_pivot: &str,
    base: &Config,
) -> Option<(String, TargetSource)> {
    if let Some(name) = profile_override {
        let name = name.trim();
        if !name.is_empty() {
            return Some((name.to_string(), TargetSource::Override));
        }
    }

    if !requested_pivot.is_empty() {
        return Some((requested_pivot.to_string(), TargetSource::Lock));
    }

    if let Ok(name) = std::env::var(ENV_PROFILE) {
        let name = name.trim().to_string();
        if !name.is_empty() {
            return Some((name, TargetSource::Environment));
        }
    }

    let declared = base.profile.trim();
    if !declared.is_empty() {
        return Some((declared.to_string(), TargetSource::BaseConfig));
    }

    None
}

/// Finds a profile by normalized-name match.
fn find_profile(profiles: &[ProfileInfo], name: &str) -> Option<usize> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    profiles
        .iter()
        .position(|p| normalize_name(&p.name) == wanted)
}

/// The effective-configuration rule shared by full resolution and profile
/// switching.
///
/// Factory defaults win when resolution already failed, or when any broken
/// profile exists while the synthetic base entry is selected. The latter is
/// deliberate policy: a directory containing broken profiles while the user
/// sits on the base profile is treated as a sign something is wrong, and the
/// possibly-stale base config is not silently trusted.
fn effective_config(
    base: &Config,
    profiles: &[ProfileInfo],
    index: usize,
    any_broken: bool,
    use_factory_defaults: bool,
) -> Config {
    if use_factory_defaults || (any_broken && index == 0) {
        return Config::defaults();
    }
    if index > 0 {
        return OverlayResolver::merge(base, &profiles[index].overlay);
    }
    base.clone()
}
