// SPDX-License-Identifier: MIT OR Apache-2.0
//! The style record shared by the title bar and every menu tree.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::error::{ThemeError, ThemeResult};

/// Colors applied to every rendered menu node.
///
/// Field names follow the record the host hands over, so a style can be
/// deserialized straight from the host's JSON (`foregroundColor`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStyle {
    /// Text color of idle items.
    #[serde(with = "crate::serde_color")]
    pub foreground_color: Color,
    /// Background of menus and idle items.
    #[serde(with = "crate::serde_color")]
    pub background_color: Color,
    /// Text color of the focused item.
    #[serde(with = "crate::serde_color")]
    pub selection_foreground_color: Color,
    /// Background of the focused item.
    #[serde(with = "crate::serde_color")]
    pub selection_background_color: Color,
    /// Color of separator lines.
    #[serde(with = "crate::serde_color")]
    pub separator_color: Color,
}

impl MenuStyle {
    /// Built-in dark style.
    pub fn dark() -> Self {
        Self {
            foreground_color: Color::from_rgb8(204, 204, 204),
            background_color: Color::from_rgb8(37, 37, 38),
            selection_foreground_color: Color::from_rgb8(255, 255, 255),
            selection_background_color: Color::from_rgb8(9, 71, 113),
            separator_color: Color::from_rgb8(96, 96, 96),
        }
    }

    /// Built-in light style.
    pub fn light() -> Self {
        Self {
            foreground_color: Color::from_rgb8(51, 51, 51),
            background_color: Color::from_rgb8(243, 243, 243),
            selection_foreground_color: Color::from_rgb8(255, 255, 255),
            selection_background_color: Color::from_rgb8(0, 96, 192),
            separator_color: Color::from_rgb8(200, 200, 200),
        }
    }

    /// Look up a built-in style by name.
    pub fn builtin(name: &str) -> ThemeResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            _ => Err(ThemeError::not_found(name)),
        }
    }

    /// Parse a style from TOML text.
    ///
    /// The five colors may sit at the top level or under a `[menu]` table.
    pub fn from_toml_str(source: &str, origin: &Path) -> ThemeResult<Self> {
        #[derive(Deserialize)]
        struct Wrapped {
            menu: MenuStyle,
        }

        if let Ok(wrapped) = toml::from_str::<Wrapped>(source) {
            return Ok(wrapped.menu);
        }
        toml::from_str::<MenuStyle>(source)
            .map_err(|err| ThemeError::parse_error(origin, err.to_string()))
    }

    /// Load a style from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ThemeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ThemeError::file_not_found(path));
        }
        let source = fs::read_to_string(path)?;
        log::debug!("Loading menu style from {:?}", path);
        Self::from_toml_str(&source, path)
    }

    /// Parse a style from the host's JSON record.
    pub fn from_json(source: &str) -> ThemeResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl Default for MenuStyle {
    fn default() -> Self {
        Self::dark()
    }
}
