//! Menu behavior configuration.
//!
//! Defaults match the stock hover policy: submenus open 250ms after the
//! pointer settles on a trigger and close 750ms after focus leaves them.
//!
//! ## Sources
//!
//! 1. `SKINBAR_MENU_CONFIG`: explicit path to a TOML file
//! 2. `$XDG_CONFIG_HOME/skinbar/menu.toml` (and `XDG_CONFIG_DIRS`)
//! 3. Built-in defaults
//!
//! ```toml
//! [menu]
//! submenu_show_delay_ms = 250
//! submenu_hide_delay_ms = 750
//! flip_inset = 10.0
//! enable_mnemonics = true
//! ```

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

use crate::error::{MenuError, MenuResult};
use crate::menu::constants::{
    SUBMENU_FLIP_INSET, SUBMENU_HIDE_DELAY_MS, SUBMENU_SHOW_DELAY_MS,
};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "SKINBAR_MENU_CONFIG";

/// Tunables for the menu state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Hover time before a submenu opens, in milliseconds.
    pub submenu_show_delay_ms: u64,
    /// Time focus may spend outside an open submenu before it closes, in milliseconds.
    pub submenu_hide_delay_ms: u64,
    /// Horizontal inset applied when a submenu is flipped below its trigger.
    pub flip_inset: f64,
    /// Whether `&` mnemonics are registered and dispatched.
    pub enable_mnemonics: bool,
}

impl MenuConfig {
    /// Delay before a hovered submenu opens.
    pub fn submenu_show_delay(&self) -> Duration {
        Duration::from_millis(self.submenu_show_delay_ms)
    }

    /// Delay before an unfocused submenu closes.
    pub fn submenu_hide_delay(&self) -> Duration {
        Duration::from_millis(self.submenu_hide_delay_ms)
    }

    /// Parse a config from TOML text. Values may sit under a `[menu]` table.
    pub fn from_toml_str(source: &str, origin: &Path) -> MenuResult<Self> {
        #[derive(Deserialize)]
        struct Wrapped {
            menu: MenuConfig,
        }

        let table: toml::Table = toml::from_str(source)
            .map_err(|err| MenuError::config_parse(origin, err.to_string()))?;
        let wrapped = table.contains_key("menu");
        let value = toml::Value::Table(table);
        let parsed = if wrapped {
            value.try_into::<Wrapped>().map(|w| w.menu)
        } else {
            value.try_into::<MenuConfig>()
        };
        parsed.map_err(|err| MenuError::config_parse(origin, err.to_string()))
    }

    /// Load a config file.
    pub fn from_file(path: impl AsRef<Path>) -> MenuResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        log::debug!("Loading menu config from {:?}", path);
        Self::from_toml_str(&source, path)
    }

    /// Resolve the config from the environment, XDG directories or defaults.
    pub fn load() -> MenuResult<Self> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(path);
        }
        let xdg_dirs = BaseDirectories::with_prefix("skinbar")?;
        match xdg_dirs.find_config_file("menu.toml") {
            Some(path) => Self::from_file(path),
            None => {
                log::debug!("No menu.toml found, using default menu config");
                Ok(Self::default())
            },
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            submenu_show_delay_ms: SUBMENU_SHOW_DELAY_MS,
            submenu_hide_delay_ms: SUBMENU_HIDE_DELAY_MS,
            flip_inset: SUBMENU_FLIP_INSET,
            enable_mnemonics: true,
        }
    }
}
