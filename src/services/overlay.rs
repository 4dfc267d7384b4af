//! Overlay merging: base configuration + profile overrides.

use crate::config::Config;
use crate::models::ProfileOverlay;

/// Merges one profile overlay into a base configuration.
pub struct OverlayResolver;

impl OverlayResolver {
    /// Produces the effective configuration for `base` with `overlay`
    /// applied.
    ///
    /// Present overlay fields overwrite the corresponding base field; absent
    /// fields leave the base value untouched. A present `commands` list
    /// replaces the base's list wholesale (no per-command merge). Returns a
    /// new value; `base` is never mutated, and the result shares no command
    /// storage with the overlay.
    #[must_use]
    pub fn merge(base: &Config, overlay: &ProfileOverlay) -> Config {
        let mut effective = base.clone();

        if let Some(x) = overlay.x {
            effective.x = x;
        }
        if let Some(y) = overlay.y {
            effective.y = y;
        }
        if let Some(shell) = &overlay.shell {
            effective.shell = shell.clone();
        }
        if let Some(theme) = &overlay.theme {
            effective.theme = theme.clone();
        }
        if let Some(header) = &overlay.header {
            effective.header = Some(header.clone());
        }
        if let Some(auto_close) = overlay.auto_close {
            effective.auto_close = auto_close;
        }
        if let Some(debug) = overlay.debug {
            effective.debug = debug;
        }
        if let Some(keys) = &overlay.keys {
            effective.keys = keys.clone();
        }
        if let Some(commands) = &overlay.commands {
            effective.commands = commands.clone();
        }

        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Command;

    fn base() -> Config {
        let mut config = Config::defaults();
        config.commands = vec![
            Command::new("Logs", "journalctl -f", 1, 'a'),
            Command::new("Top", "htop", 1, 'b'),
        ];
        config
    }

    #[test]
    fn test_empty_overlay_is_identity() {
        let base = base();
        let merged = OverlayResolver::merge(&base, &ProfileOverlay::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_single_field_changes_exactly_that_field() {
        let base = base();
        let overlay = ProfileOverlay {
            theme: Some("night".to_string()),
            ..ProfileOverlay::default()
        };

        let merged = OverlayResolver::merge(&base, &overlay);

        assert_eq!(merged.theme, "night");
        let mut expected = base.clone();
        expected.theme = "night".to_string();
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_scenario_grid_kept_theme_swapped() {
        // base {X:3, Y:3, Theme:"core"} + overlay {Theme:"night"}
        let mut base = Config::defaults();
        base.x = 3;
        base.y = 3;
        base.theme = "core".to_string();

        let overlay = ProfileOverlay {
            theme: Some("night".to_string()),
            ..ProfileOverlay::default()
        };

        let merged = OverlayResolver::merge(&base, &overlay);
        assert_eq!((merged.x, merged.y, merged.theme.as_str()), (3, 3, "night"));
    }

    #[test]
    fn test_commands_replace_wholesale() {
        let base = base();
        let overlay = ProfileOverlay {
            commands: Some(vec![Command::new("Deploy", "make deploy", 2, 'z')]),
            ..ProfileOverlay::default()
        };

        let merged = OverlayResolver::merge(&base, &overlay);

        assert_eq!(merged.commands.len(), 1);
        assert_eq!(merged.commands[0].name, "Deploy");
        // Base keeps its own list
        assert_eq!(base.commands.len(), 2);
    }

    #[test]
    fn test_explicit_false_overrides_true_default() {
        let base = base();
        assert!(base.auto_close);

        let overlay = ProfileOverlay {
            auto_close: Some(false),
            ..ProfileOverlay::default()
        };

        let merged = OverlayResolver::merge(&base, &overlay);
        assert!(!merged.auto_close);
    }

    #[test]
    fn test_merged_commands_do_not_alias_overlay() {
        let base = base();
        let overlay = ProfileOverlay {
            commands: Some(vec![Command::new("Deploy", "make deploy", 2, 'z')]),
            ..ProfileOverlay::default()
        };

        let mut merged = OverlayResolver::merge(&base, &overlay);
        merged.commands[0].name = "Renamed".to_string();

        assert_eq!(overlay.commands.as_ref().unwrap()[0].name, "Deploy");
    }
}
