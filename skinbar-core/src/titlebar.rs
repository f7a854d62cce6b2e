//! Title bar container mirroring the host window state.

use serde::{Deserialize, Serialize};
use skinbar_theme::MenuStyle;
use vello::kurbo::Size;

use crate::dom::{ElementId, StyleValue};
use crate::menu::constants::class;
use crate::menubar::MenuBar;

/// Window-manager state reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowState {
    /// The window is maximized.
    pub maximized: bool,
    /// The window has keyboard focus.
    pub focused: bool,
    /// The window is fullscreen.
    pub fullscreen: bool,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            maximized: false,
            focused: true,
            fullscreen: false,
        }
    }
}

/// The title bar: window title plus menubar, styled after the window state.
#[derive(Debug)]
pub struct TitleBar {
    menubar: MenuBar,
    container: ElementId,
    title: ElementId,
    window: WindowState,
}

impl TitleBar {
    /// Wrap `menubar` into a title bar container under the document root.
    pub fn new(mut menubar: MenuBar) -> Self {
        let menubar_container = menubar.container();
        let dom = menubar.dom_mut();
        let container = dom.create_with_class("div", class::TITLEBAR);
        let title = dom.create_with_class("span", class::WINDOW_TITLE);
        let root = dom.root();
        dom.append_child(root, container);
        dom.append_child(container, menubar_container);
        dom.append_child(container, title);

        let mut titlebar = Self {
            menubar,
            container,
            title,
            window: WindowState::default(),
        };
        titlebar.mirror_window_state();
        titlebar.paint();
        titlebar
    }

    /// The title bar container.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The embedded menubar.
    pub fn menubar(&self) -> &MenuBar {
        &self.menubar
    }

    /// Mutable access to the embedded menubar.
    pub fn menubar_mut(&mut self) -> &mut MenuBar {
        &mut self.menubar
    }

    /// Last window state applied.
    pub fn window_state(&self) -> WindowState {
        self.window
    }

    /// Set the window title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        let element = self.title;
        self.menubar.dom_mut().set_text(element, title);
    }

    /// The current title text.
    pub fn title(&self) -> Option<&str> {
        self.menubar.dom().text(self.title)
    }

    /// Mirror a new window state. Losing window focus blurs the menubar.
    pub fn apply_window_state(&mut self, state: WindowState) {
        let lost_focus = self.window.focused && !state.focused;
        self.window = state;
        self.mirror_window_state();
        if lost_focus {
            self.menubar.on_blur();
        }
    }

    /// The host window was resized.
    pub fn on_window_resize(&mut self, size: Size) {
        self.menubar.on_window_resize(size);
    }

    /// Change the style of the title bar and everything in it.
    pub fn set_style(&mut self, style: MenuStyle) {
        self.menubar.set_style(style);
        self.paint();
    }

    fn mirror_window_state(&mut self) {
        let container = self.container;
        let state = self.window;
        let dom = self.menubar.dom_mut();
        dom.toggle_class(container, class::MAXIMIZED, state.maximized);
        dom.toggle_class(container, class::INACTIVE, !state.focused);
        dom.toggle_class(container, class::FULLSCREEN, state.fullscreen);
    }

    fn paint(&mut self) {
        let container = self.container;
        let style = *self.menubar.style();
        let dom = self.menubar.dom_mut();
        dom.set_style(container, "color", StyleValue::Color(style.foreground_color));
        dom.set_style(
            container,
            "background-color",
            StyleValue::Color(style.background_color),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::error::DispatchError;
    use crate::menu::commands::CommandId;

    fn titlebar() -> TitleBar {
        let bar = MenuBar::new(|_: CommandId| -> Result<(), DispatchError> { Ok(()) }, Instant::now());
        TitleBar::new(bar)
    }

    #[test]
    fn test_menubar_moves_into_titlebar() {
        let titlebar = titlebar();
        let dom = titlebar.menubar().dom();
        assert_eq!(dom.parent(titlebar.menubar().container()), Some(titlebar.container()));
        assert!(dom.is_connected(titlebar.container()));
    }

    #[test]
    fn test_window_state_classes() {
        let mut titlebar = titlebar();
        let container = titlebar.container();
        assert!(!titlebar.menubar().dom().has_class(container, class::INACTIVE));

        titlebar.apply_window_state(WindowState {
            maximized: true,
            focused: false,
            fullscreen: false,
        });
        let dom = titlebar.menubar().dom();
        assert!(dom.has_class(container, class::MAXIMIZED));
        assert!(dom.has_class(container, class::INACTIVE));
        assert!(!dom.has_class(container, class::FULLSCREEN));

        titlebar.apply_window_state(WindowState {
            fullscreen: true,
            ..WindowState::default()
        });
        let dom = titlebar.menubar().dom();
        assert!(!dom.has_class(container, class::MAXIMIZED));
        assert!(!dom.has_class(container, class::INACTIVE));
        assert!(dom.has_class(container, class::FULLSCREEN));
    }

    #[test]
    fn test_title_text() {
        let mut titlebar = titlebar();
        titlebar.set_title("Untitled - Editor");
        assert_eq!(titlebar.title(), Some("Untitled - Editor"));
    }
}
