//! Shared state threaded through every menu tree during one event.

use skinbar_theme::MenuStyle;
use vello::kurbo::Size;

use crate::config::MenuConfig;
use crate::dispatch::{CommandDispatcher, IconResolver};
use crate::dom::{ElementId, ElementTree, StyleValue};
use crate::menu::commands::CommandId;
use crate::timer::TimerQueue;

/// Which of the two submenu debounce timers fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuTimer {
    /// Hover delay elapsed.
    Show,
    /// Focus stayed outside the submenu long enough.
    Hide,
}

/// Timer event addressed to one submenu node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTimer {
    /// Item indices from the outermost tree down to the submenu node.
    pub path: Vec<usize>,
    /// Which timer fired.
    pub kind: SubmenuTimer,
}

/// Where focus lands when a tree is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A specific item.
    Index(usize),
    /// The first navigable item.
    SelectFirst,
    /// Keep the current item, selecting the first one if there is none.
    Default,
    /// The container itself, with no item selected.
    Container,
}

/// Pointer events delivered to menu rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// The pointer moved onto an element.
    Enter,
    /// The pointer left an element.
    Leave,
    /// A primary-button click.
    Click,
}

/// What a tree reports to its owner after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    /// Consumed, nothing for the owner to do.
    Handled,
    /// Not for this tree.
    Ignored,
    /// Escape: the owner should tear this tree down and take focus back.
    Cancel,
    /// Left inside a nested tree: close it and focus its trigger.
    CloseToParent,
    /// Left at the outermost tree: move to the previous top-level menu.
    NavigateLeft,
    /// Right on an item without submenu: move to the next top-level menu.
    NavigateRight,
    /// A leaf was activated and the whole menu should close.
    Activated(CommandId),
}

/// Borrowed collaborators for one event.
pub struct MenuEnv<'a> {
    /// The element tree menus render into.
    pub dom: &'a mut ElementTree,
    /// Queue the submenu debounce timers live in.
    pub timers: &'a mut TimerQueue<MenuTimer>,
    /// Receives activated command ids.
    pub dispatcher: &'a mut dyn CommandDispatcher,
    /// Renders image icons.
    pub icons: &'a mut dyn IconResolver,
    /// Colors applied to rendered nodes.
    pub style: &'a MenuStyle,
    /// Behavior tunables.
    pub config: &'a MenuConfig,
    /// Size of the host window, used for submenu placement.
    pub viewport: Size,
}

impl<'a> MenuEnv<'a> {
    pub(crate) fn paint_container(&mut self, el: ElementId) {
        self.dom
            .set_style(el, "color", StyleValue::Color(self.style.foreground_color));
        self.dom.set_style(
            el,
            "background-color",
            StyleValue::Color(self.style.background_color),
        );
    }

    pub(crate) fn paint_row(&mut self, el: ElementId, selected: bool) {
        let (fg, bg) = if selected {
            (
                self.style.selection_foreground_color,
                self.style.selection_background_color,
            )
        } else {
            (self.style.foreground_color, self.style.background_color)
        };
        self.dom.set_style(el, "color", StyleValue::Color(fg));
        self.dom.set_style(el, "background-color", StyleValue::Color(bg));
    }

    pub(crate) fn paint_separator(&mut self, el: ElementId) {
        self.dom.set_style(
            el,
            "border-bottom-color",
            StyleValue::Color(self.style.separator_color),
        );
    }
}
