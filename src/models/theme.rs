//! Color themes for the launcher surface.
//!
//! Themes are explicit values carried in the resolved bundle and passed into
//! the rendering layer by the caller. There is no global style state; a
//! reload that changes the theme produces a new bundle with a new `Theme`.

use serde::Serialize;

/// A named color palette.
///
/// Colors are hex strings (`#rrggbb`); the rendering layer owns the mapping
/// to terminal colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Palette name
    pub name: String,
    /// Screen background
    pub background: String,
    /// Panel / grid cell background
    pub surface: String,
    /// Header and selection color
    pub primary: String,
    /// Accent for markers (lock indicator, held item)
    pub accent: String,
    /// Foreground text
    pub text: String,
}

impl Theme {
    fn built_in(name: &str) -> Option<Self> {
        let (background, surface, primary, accent, text) = match name {
            "core" => ("#1d2021", "#282828", "#458588", "#d79921", "#ebdbb2"),
            "night" => ("#0f111a", "#1a1d2d", "#5973c7", "#c792ea", "#d6deeb"),
            "ember" => ("#1c1412", "#2b1d18", "#bf4a36", "#e6a23c", "#f2e5d5"),
            "paper" => ("#f5f1e8", "#ffffff", "#3c6e8f", "#b05c2a", "#2a2a28"),
            _ => return None,
        };

        Some(Self {
            name: name.to_string(),
            background: background.to_string(),
            surface: surface.to_string(),
            primary: primary.to_string(),
            accent: accent.to_string(),
            text: text.to_string(),
        })
    }

    /// Names of all built-in themes.
    #[must_use]
    pub fn names() -> &'static [&'static str] {
        &["core", "night", "ember", "paper"]
    }

    /// Looks up a theme by name, case-insensitively.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        Self::built_in(name.trim().to_lowercase().as_str())
    }

    /// Resolves a theme name to a palette, falling back to the default
    /// palette when the name is unknown.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        Self::named(name).unwrap_or_else(|| {
            if !name.trim().is_empty() {
                tracing::warn!(theme = name, "unknown theme, falling back to default");
            }
            Self::built_in("core").unwrap_or_else(|| unreachable!("core theme is built in"))
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::resolve("core")
    }
}
