//! Menu constants
//!
//! Centralized constants for timing, layout estimates and element classes.

/// Hover time before a submenu opens, in milliseconds
pub const SUBMENU_SHOW_DELAY_MS: u64 = 250;

/// Time focus may spend outside an open submenu before it closes, in milliseconds
pub const SUBMENU_HIDE_DELAY_MS: u64 = 750;

/// Horizontal inset of a submenu flipped below its trigger
pub const SUBMENU_FLIP_INSET: f64 = 10.0;

/// Height of each menu item in pixels
pub const ITEM_HEIGHT: f64 = 24.0;

/// Height of a separator row in pixels
pub const SEPARATOR_HEIGHT: f64 = 10.0;

/// Top and bottom padding for the menu
pub const PADDING: f64 = 4.0;

/// Minimum width of the menu
pub const MIN_WIDTH: f64 = 120.0;

/// Maximum width of the menu
pub const MAX_WIDTH: f64 = 400.0;

/// Estimated pixels per character for label text
pub const TEXT_CHAR_WIDTH: f64 = 7.0;

/// Estimated pixels per character for keybinding text
pub const SHORTCUT_CHAR_WIDTH: f64 = 8.0;

/// Minimum gap between label and keybinding
pub const MIN_TEXT_SHORTCUT_GAP: f64 = 40.0;

/// Width reserved for the check mark column and the submenu arrow
pub const CHECKMARK_ARROW_WIDTH: f64 = 20.0;

/// Height of the menubar
pub const MENUBAR_HEIGHT: f64 = 30.0;

/// Horizontal padding on each side of a menubar button label
pub const MENUBAR_BUTTON_PADDING: f64 = 8.0;

/// Viewport width assumed until the host reports a window size
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// Viewport height assumed until the host reports a window size
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Check mark glyph for checked checkbox items
pub const CHECK_GLYPH: &str = "\u{2713}";

/// Bullet glyph for the selected radio item
pub const RADIO_GLYPH: &str = "\u{2022}";

/// Arrow glyph of submenu triggers
pub const SUBMENU_GLYPH: &str = "\u{203a}";

/// Element classes set by the engine
pub mod class {
    /// Root of a menu tree
    pub const MENU_CONTAINER: &str = "menu-container";
    /// Any item row
    pub const ACTION_ITEM: &str = "action-item";
    /// Separator row
    pub const SEPARATOR: &str = "separator";
    /// Submenu trigger row
    pub const SUBMENU: &str = "submenu-item";
    /// Item excluded from navigation
    pub const DISABLED: &str = "disabled";
    /// Item hidden by the description
    pub const HIDDEN: &str = "hidden";
    /// Item holding the menu focus
    pub const FOCUSED: &str = "focused";
    /// Checked checkbox or radio item
    pub const CHECKED: &str = "checked";
    /// Trigger whose submenu is open
    pub const OPEN: &str = "open";
    /// Submenu flipped below its trigger
    pub const FLIPPED: &str = "flipped";
    /// Label span
    pub const LABEL: &str = "action-label";
    /// Check mark span
    pub const CHECK: &str = "menu-item-check";
    /// Icon span
    pub const ICON: &str = "menu-item-icon";
    /// Keybinding span
    pub const KEYBINDING: &str = "keybinding";
    /// Submenu arrow span
    pub const SUBMENU_INDICATOR: &str = "submenu-indicator";
    /// Menubar container
    pub const MENUBAR: &str = "menubar";
    /// Top-level menubar button
    pub const MENUBAR_BUTTON: &str = "menubar-menu-button";
    /// Menubar button label
    pub const MENUBAR_TITLE: &str = "menubar-menu-title";
    /// Menubar showing mnemonic underlines
    pub const MNEMONICS_VISIBLE: &str = "mnemonics-visible";
    /// Title bar container
    pub const TITLEBAR: &str = "titlebar";
    /// Window title span
    pub const WINDOW_TITLE: &str = "window-title";
    /// Window is maximized
    pub const MAXIMIZED: &str = "maximized";
    /// Window does not have focus
    pub const INACTIVE: &str = "inactive";
    /// Window is fullscreen
    pub const FULLSCREEN: &str = "fullscreen";
}
