#![warn(missing_docs)]

//! Skinnable window title bar and application menubar, rendered as a
//! retained element tree the host mirrors.

pub use vello::kurbo as geometry;
pub use vello::peniko as color;

pub use skinbar_core as core;
pub use skinbar_theme as theme;

/// A "prelude" for users of skinbar.
///
/// Importing this module brings into scope the most common types
/// needed to drive a menubar.
///
/// ```rust
/// use skinbar::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::MenuConfig;
    pub use crate::core::dispatch::{CommandDispatcher, CommandRegistry, IconResolver, NoIcons};
    pub use crate::core::dom::{ElementId, ElementTree, Mutation, StyleValue};
    pub use crate::core::error::{DispatchError, MenuError, MenuResult};
    pub use crate::core::keys::{Key, Modifiers};
    pub use crate::core::menu::{CommandId, LeafKind, MenuDescription, MenuIcon, MenuNode, MenuTree};
    pub use crate::core::menubar::{EventStatus, MenuBar, MenuBarState};
    pub use crate::core::titlebar::{TitleBar, WindowState};

    pub use crate::theme::config::{ThemeConfig, ThemeSource};
    pub use crate::theme::{MenuStyle, ThemeError, ThemeResult};

    pub use vello::kurbo::{Point, Rect, Size};
    pub use vello::peniko::Color;
}
