//! Sparse profile overlay model.

use serde::{Deserialize, Serialize};

use crate::config::KeyBindings;
use crate::models::Command;

/// A sparse patch over the base configuration.
///
/// Every field is optional; only present fields override the base when
/// merged. Absence is distinct from an explicit value ("absence means
/// inherit"), which is why each field is an `Option` rather than a default.
/// The `commands` list, if present, replaces the base's list wholesale.
///
/// An overlay with no fields set carries no information and is rejected by
/// profile discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileOverlay {
    /// Grid width override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Grid height override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    /// Shell override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Theme override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Header art override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Auto-close behavior override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_close: Option<bool>,
    /// Debug behavior override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    /// Key binding override (replaced as a whole, not per binding)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<KeyBindings>,
    /// Command list override (wholesale replacement, no per-command merge)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands: Option<Vec<Command>>,
}

impl ProfileOverlay {
    /// Whether the overlay has zero fields set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.shell.is_none()
            && self.theme.is_none()
            && self.header.is_none()
            && self.auto_close.is_none()
            && self.debug.is_none()
            && self.keys.is_none()
            && self.commands.is_none()
    }
}
