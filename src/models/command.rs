//! Command and dropdown-item data structures.

use serde::{Deserialize, Serialize};

/// A named grid cell bound to a shell string.
///
/// # Validation
///
/// - `row` is a 1-based grid row; values outside the grid are skipped by the
///   renderer rather than rejected here
/// - `col` must be a single ASCII letter; `"z"` places the command in the
///   last column of the grid
/// - `auto_close` / `debug` are overrides: `None` inherits the config-level
///   behavior defaults, `Some(false)` is an explicit opt-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Display name shown in the grid cell
    pub name: String,
    /// Shell string executed when the cell is activated
    #[serde(default)]
    pub exec: String,
    /// 1-based grid row
    #[serde(default = "default_row")]
    pub row: i64,
    /// Single-letter grid column; "z" means the last column
    #[serde(default = "default_col")]
    pub col: String,
    /// Per-command override of the auto-close behavior default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_close: Option<bool>,
    /// Per-command override of the debug behavior default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// Nested dropdown entries (one level of nesting only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CommandItem>,
}

/// A single entry of a command dropdown.
///
/// Items cannot nest further; the grid position comes from the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandItem {
    /// Display name shown in the dropdown
    pub name: String,
    /// Shell string executed when the item is activated
    #[serde(default)]
    pub exec: String,
    /// Per-item override of the auto-close behavior default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_close: Option<bool>,
    /// Per-item override of the debug behavior default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

fn default_row() -> i64 {
    1
}

fn default_col() -> String {
    "a".to_string()
}

impl Command {
    /// Creates a new command at the given position.
    pub fn new(name: impl Into<String>, exec: impl Into<String>, row: i64, col: char) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
            row,
            col: col.to_string(),
            auto_close: None,
            debug: None,
            items: Vec::new(),
        }
    }

    /// Resolves the column letter to a 0-based index for a grid of
    /// `grid_width` columns.
    ///
    /// Returns `None` when `col` is not a single ASCII letter. The letter
    /// `z` always maps to the last column; any other letter past the grid
    /// width is clamped to the last column as well.
    #[must_use]
    pub fn column_index(&self, grid_width: usize) -> Option<usize> {
        if grid_width == 0 {
            return None;
        }
        let mut chars = self.col.chars();
        let letter = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() || !letter.is_ascii_lowercase() {
            return None;
        }
        if letter == 'z' {
            return Some(grid_width - 1);
        }
        let index = (letter as usize) - ('a' as usize);
        Some(index.min(grid_width - 1))
    }

    /// Whether this command opens a dropdown instead of executing directly.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Effective auto-close flag given the config-level default.
    #[must_use]
    pub fn effective_auto_close(&self, config_default: bool) -> bool {
        self.auto_close.unwrap_or(config_default)
    }

    /// Effective debug flag given the config-level default.
    #[must_use]
    pub fn effective_debug(&self, config_default: bool) -> bool {
        self.debug.unwrap_or(config_default)
    }
}

impl CommandItem {
    /// Creates a new dropdown item.
    pub fn new(name: impl Into<String>, exec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec: exec.into(),
            auto_close: None,
            debug: None,
        }
    }

    /// Effective auto-close flag given the config-level default.
    #[must_use]
    pub fn effective_auto_close(&self, config_default: bool) -> bool {
        self.auto_close.unwrap_or(config_default)
    }

    /// Effective debug flag given the config-level default.
    #[must_use]
    pub fn effective_debug(&self, config_default: bool) -> bool {
        self.debug.unwrap_or(config_default)
    }
}
