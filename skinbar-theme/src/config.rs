//! # Theme Configuration
//!
//! Resolves the [MenuStyle] used by the title bar.
//!
//! ## Environment Variables
//!
//! - `SKINBAR_THEME`: `light`, `dark`, or a path to a TOML style file
//! - `SKINBAR_THEME_FALLBACK`: style used when the primary one fails to load
//!
//! ## Style File Format
//!
//! ```toml
//! [menu]
//! foregroundColor = "#cccccc"
//! backgroundColor = "#252526"
//! selectionForegroundColor = "#ffffff"
//! selectionBackgroundColor = "#094771"
//! separatorColor = "#606060"
//! ```

use std::env;
use std::path::PathBuf;

use crate::error::ThemeResult;
use crate::style::MenuStyle;

/// Environment variable naming the primary theme.
pub const THEME_ENV: &str = "SKINBAR_THEME";

/// Environment variable naming the fallback theme.
pub const THEME_FALLBACK_ENV: &str = "SKINBAR_THEME_FALLBACK";

/// A source for a menu style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    /// Built-in light style.
    Light,
    /// Built-in dark style.
    Dark,
    /// Style loaded from a TOML file.
    File(PathBuf),
}

impl ThemeSource {
    /// Interpret a user supplied theme name.
    ///
    /// Anything that is not a built-in name is treated as a file path.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::File(PathBuf::from(value.trim())),
        }
    }

    /// Load the style this source points at.
    pub fn load(&self) -> ThemeResult<MenuStyle> {
        match self {
            Self::Light => Ok(MenuStyle::light()),
            Self::Dark => Ok(MenuStyle::dark()),
            Self::File(path) => MenuStyle::from_file(path),
        }
    }
}

/// Which style to use, with an optional fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    /// The primary style source.
    pub default_theme: ThemeSource,
    /// Used when the primary source fails to load.
    pub fallback_theme: Option<ThemeSource>,
}

impl ThemeConfig {
    /// Dark style with no fallback.
    pub fn new() -> Self {
        Self {
            default_theme: ThemeSource::Dark,
            fallback_theme: None,
        }
    }

    /// Read `SKINBAR_THEME` and `SKINBAR_THEME_FALLBACK`, defaulting to dark.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();
        if let Ok(value) = env::var(THEME_ENV) {
            config.default_theme = ThemeSource::parse(&value);
        }
        if let Ok(value) = env::var(THEME_FALLBACK_ENV) {
            config.fallback_theme = Some(ThemeSource::parse(&value));
        }
        config
    }

    /// Set the primary source.
    pub fn with_default_theme(mut self, source: ThemeSource) -> Self {
        self.default_theme = source;
        self
    }

    /// Set the fallback source.
    pub fn with_fallback_theme(mut self, source: ThemeSource) -> Self {
        self.fallback_theme = Some(source);
        self
    }

    /// Load the primary style, falling back when it fails.
    pub fn resolve_style(&self) -> ThemeResult<MenuStyle> {
        match self.default_theme.load() {
            Ok(style) => Ok(style),
            Err(err) => match &self.fallback_theme {
                Some(fallback) => {
                    log::warn!(
                        "Failed to load theme {:?} ({}), using fallback {:?}",
                        self.default_theme,
                        err,
                        fallback
                    );
                    fallback.load()
                },
                None => Err(err),
            },
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::new()
    }
}
