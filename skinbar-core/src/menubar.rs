// SPDX-License-Identifier: MIT OR Apache-2.0
//! The menubar controller.
//!
//! [MenuBar] owns one button per top-level menu and at most one open
//! [MenuTree]. Its global state moves between [MenuBarState::Hidden],
//! [MenuBarState::Visible], [MenuBarState::Focused] and [MenuBarState::Open].
//!
//! The host feeds it input events, window changes and clock ticks, and mirrors
//! [MenuBar::dom] onto the screen.

use std::time::Instant;

use skinbar_theme::config::ThemeConfig;
use skinbar_theme::MenuStyle;
use vello::kurbo::{Rect, Size};

use crate::config::MenuConfig;
use crate::dispatch::{CommandDispatcher, IconResolver, NoIcons};
use crate::dom::{ElementId, ElementTree, Mutation};
use crate::error::MenuResult;
use crate::keys::{parse_mnemonic, Key, Modifiers};
use crate::menu::commands::CommandId;
use crate::menu::constants::{
    class, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, MENUBAR_BUTTON_PADDING, MENUBAR_HEIGHT,
    TEXT_CHAR_WIDTH,
};
use crate::menu::context::{FocusTarget, MenuEnv, MenuTimer, PointerEvent, TreeOutcome};
use crate::menu::description::{MenuDescription, MenuNode};
use crate::menu::mnemonic::{MnemonicHit, MnemonicIndex};
use crate::menu::position::Anchor;
use crate::menu::tree::MenuTree;
use crate::timer::TimerQueue;

/// Global state of the menubar. Each state implies the ones below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MenuBarState {
    /// Not shown at all.
    Hidden,
    /// Shown, without keyboard focus.
    Visible,
    /// A top-level button holds keyboard focus.
    Focused,
    /// A top-level menu is open.
    Open,
}

/// Whether the menubar consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Consumed.
    Handled,
    /// Not for the menubar.
    Ignored,
}

impl EventStatus {
    /// Check if the event was consumed.
    pub fn is_handled(self) -> bool {
        self == EventStatus::Handled
    }
}

struct BarContext {
    dom: ElementTree,
    timers: TimerQueue<MenuTimer>,
    dispatcher: Box<dyn CommandDispatcher>,
    icons: Box<dyn IconResolver>,
    style: MenuStyle,
    config: MenuConfig,
    viewport: Size,
}

impl BarContext {
    fn env(&mut self) -> MenuEnv<'_> {
        MenuEnv {
            dom: &mut self.dom,
            timers: &mut self.timers,
            dispatcher: &mut *self.dispatcher,
            icons: &mut *self.icons,
            style: &self.style,
            config: &self.config,
            viewport: self.viewport,
        }
    }
}

#[derive(Debug)]
struct MenuBarEntry {
    button: ElementId,
    title: ElementId,
    node: MenuNode,
    tree: Option<MenuTree>,
}

impl MenuBarEntry {
    fn is_navigable(&self) -> bool {
        match &self.node {
            MenuNode::Leaf(leaf) => leaf.enabled && leaf.visible,
            MenuNode::Submenu(sub) => sub.enabled && sub.visible,
            MenuNode::Separator => false,
        }
    }
}

/// Top-level menu controller.
pub struct MenuBar {
    ctx: BarContext,
    container: ElementId,
    menus: Vec<MenuBarEntry>,
    mnemonics: MnemonicIndex,
    state: MenuBarState,
    focused_menu: Option<usize>,
    open_menu: Option<usize>,
    opened_via_keyboard: bool,
    focus_to_return: Option<ElementId>,
    ignore_next_mouse_up: bool,
    alt_pressed_alone: bool,
}

impl MenuBar {
    /// Create an empty, visible menubar. `now` starts the timer clock.
    pub fn new(dispatcher: impl CommandDispatcher + 'static, now: Instant) -> Self {
        let mut dom = ElementTree::new();
        let container = dom.create_with_class("div", class::MENUBAR);
        dom.set_attribute(container, "role", "menubar");
        let root = dom.root();
        dom.append_child(root, container);

        let viewport = Size::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT);
        dom.set_rect(container, Rect::new(0.0, 0.0, viewport.width, MENUBAR_HEIGHT));

        let mut bar = Self {
            ctx: BarContext {
                dom,
                timers: TimerQueue::new(now),
                dispatcher: Box::new(dispatcher),
                icons: Box::new(NoIcons),
                style: MenuStyle::default(),
                config: MenuConfig::default(),
                viewport,
            },
            container,
            menus: Vec::new(),
            mnemonics: MnemonicIndex::new(),
            state: MenuBarState::Visible,
            focused_menu: None,
            open_menu: None,
            opened_via_keyboard: false,
            focus_to_return: None,
            ignore_next_mouse_up: false,
            alt_pressed_alone: false,
        };
        bar.paint_bar();
        bar
    }

    /// Use `icons` to render image icons.
    pub fn with_icons(mut self, icons: impl IconResolver + 'static) -> Self {
        self.ctx.icons = Box::new(icons);
        self
    }

    /// Use `style` for every rendered node.
    pub fn with_style(mut self, style: MenuStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Use `config` for delays and mnemonics. Applies to menus loaded afterwards.
    pub fn with_config(mut self, config: MenuConfig) -> Self {
        self.ctx.config = config;
        self
    }

    /// Set the initial viewport size.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.set_viewport(viewport);
        self
    }

    /// Current state.
    pub fn state(&self) -> MenuBarState {
        self.state
    }

    /// Index of the top-level button holding focus.
    pub fn focused_menu(&self) -> Option<usize> {
        self.focused_menu
    }

    /// Index of the open top-level menu.
    pub fn open_menu(&self) -> Option<usize> {
        self.open_menu
    }

    /// The open top-level tree.
    pub fn open_tree(&self) -> Option<&MenuTree> {
        self.open_menu
            .and_then(|index| self.menus.get(index))
            .and_then(|entry| entry.tree.as_ref())
    }

    /// Number of top-level buttons.
    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    /// Button element of a top-level menu.
    pub fn button(&self, index: usize) -> Option<ElementId> {
        self.menus.get(index).map(|entry| entry.button)
    }

    /// Label span of a top-level button.
    pub fn button_title(&self, index: usize) -> Option<ElementId> {
        self.menus.get(index).map(|entry| entry.title)
    }

    /// The menubar container element.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// The element tree the menubar renders into.
    pub fn dom(&self) -> &ElementTree {
        &self.ctx.dom
    }

    /// Mutable access for hosts that report layout or own sibling elements.
    pub fn dom_mut(&mut self) -> &mut ElementTree {
        &mut self.ctx.dom
    }

    /// Drain structural mutations since the last call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        self.ctx.dom.take_mutations()
    }

    /// The style in use.
    pub fn style(&self) -> &MenuStyle {
        &self.ctx.style
    }

    /// The configuration in use.
    pub fn config(&self) -> &MenuConfig {
        &self.ctx.config
    }

    /// The viewport used for submenu placement.
    pub fn viewport(&self) -> Size {
        self.ctx.viewport
    }

    /// Earliest pending timer deadline. Hosts should call [tick](Self::tick) then.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ctx.timers.next_deadline()
    }

    /// Replace the whole menu. Any open menu is closed first.
    pub fn set_menu(&mut self, description: &MenuDescription) -> MenuResult<()> {
        description.validate()?;
        if self.state > MenuBarState::Visible {
            self.set_state(MenuBarState::Visible);
        }
        self.clear_menus();

        let enable_mnemonics = self.ctx.config.enable_mnemonics;
        let dom = &mut self.ctx.dom;
        let mut x = 0.0;
        for node in &description.items {
            if node.is_separator() {
                log::warn!("Skipping separator at the top level of the menubar");
                continue;
            }
            let index = self.menus.len();
            let parsed = parse_mnemonic(node.label());

            let button = dom.create_with_class("div", class::MENUBAR_BUTTON);
            dom.set_attribute(button, "role", "menuitem");
            if matches!(node, MenuNode::Submenu(_)) {
                dom.set_attribute(button, "aria-haspopup", "true");
            }
            let title = dom.create_with_class("span", class::MENUBAR_TITLE);
            let width = parsed.display_text.chars().count() as f64 * TEXT_CHAR_WIDTH
                + MENUBAR_BUTTON_PADDING * 2.0;
            dom.set_text(title, parsed.display_text);
            if let Some(mnemonic_index) = parsed.mnemonic_index {
                dom.set_attribute(title, "data-mnemonic-index", mnemonic_index.to_string());
            }
            dom.append_child(button, title);
            dom.set_rect(button, Rect::new(x, 0.0, x + width, MENUBAR_HEIGHT));
            x += width;

            let entry = MenuBarEntry {
                button,
                title,
                node: node.clone(),
                tree: None,
            };
            if !entry.is_navigable() {
                let hidden = match node {
                    MenuNode::Leaf(leaf) => !leaf.visible,
                    MenuNode::Submenu(sub) => !sub.visible,
                    MenuNode::Separator => false,
                };
                let marker = if hidden { class::HIDDEN } else { class::DISABLED };
                dom.add_class(button, marker);
            }
            if enable_mnemonics && entry.is_navigable() {
                if let Some(letter) = parsed.mnemonic {
                    self.mnemonics.register(letter, index);
                }
            }
            dom.append_child(self.container, button);
            self.menus.push(entry);
        }

        self.paint_bar();
        log::info!("Menubar loaded with {} menus", self.menus.len());
        Ok(())
    }

    fn clear_menus(&mut self) {
        self.close_open_menu();
        for entry in self.menus.drain(..) {
            self.ctx.dom.remove(entry.button);
        }
        self.mnemonics.clear();
        self.focused_menu = None;
    }

    /// Change the style and re-apply it to the bar and every open tree.
    pub fn set_style(&mut self, style: MenuStyle) {
        self.ctx.style = style;
        self.paint_bar();
        if let Some(index) = self.open_menu {
            let mut env = self.ctx.env();
            if let Some(tree) = self.menus.get_mut(index).and_then(|entry| entry.tree.as_mut()) {
                tree.restyle(&mut env);
            }
        }
    }

    /// Resolve `theme` and apply the resulting style.
    ///
    /// The current style is kept when neither the primary nor the fallback
    /// source loads.
    pub fn load_style(&mut self, theme: &ThemeConfig) -> MenuResult<()> {
        let style = theme.resolve_style()?;
        self.set_style(style);
        Ok(())
    }

    /// Show a hidden menubar.
    pub fn show(&mut self) {
        if self.state == MenuBarState::Hidden {
            self.set_state(MenuBarState::Visible);
        }
    }

    /// Hide the menubar, closing everything.
    pub fn hide(&mut self) {
        self.set_state(MenuBarState::Hidden);
    }

    /// The host window was resized: menus close and the bar drops to Visible.
    pub fn on_window_resize(&mut self, size: Size) {
        self.set_viewport(size);
        if self.state > MenuBarState::Visible {
            self.set_state(MenuBarState::Visible);
        }
    }

    fn set_viewport(&mut self, size: Size) {
        self.ctx.viewport = size;
        self.ctx
            .dom
            .set_rect(self.container, Rect::new(0.0, 0.0, size.width, MENUBAR_HEIGHT));
    }

    /// Focus left the menubar or the window.
    pub fn on_blur(&mut self) -> EventStatus {
        self.alt_pressed_alone = false;
        if self.state >= MenuBarState::Focused {
            self.set_state(MenuBarState::Visible);
            EventStatus::Handled
        } else {
            EventStatus::Ignored
        }
    }

    /// Run due submenu timers.
    pub fn tick(&mut self, now: Instant) {
        let fired = self.ctx.timers.advance(now);
        if fired.is_empty() {
            return;
        }
        for (handle, timer) in fired {
            let Some(&menu) = timer.path.first() else {
                continue;
            };
            if self.open_menu != Some(menu) {
                log::trace!("Dropping timer for closed menu {}", menu);
                continue;
            }
            let mut env = self.ctx.env();
            if let Some(tree) = self.menus.get_mut(menu).and_then(|entry| entry.tree.as_mut()) {
                tree.on_timer(&mut env, handle, &timer);
            }
        }
        self.after_event();
    }

    /// A key went down.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> EventStatus {
        if key == Key::Alt {
            self.alt_pressed_alone = true;
            if self.state != MenuBarState::Hidden {
                self.ctx.dom.add_class(self.container, class::MNEMONICS_VISIBLE);
            }
            return EventStatus::Ignored;
        }
        self.alt_pressed_alone = false;

        let status = self.route_key(key, modifiers);
        self.after_event();
        status
    }

    /// A key went up. Alt released on its own toggles keyboard focus.
    ///
    /// Tab is handled here rather than on key-down: by now the host has moved
    /// focus and the open menu can follow it.
    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> EventStatus {
        if key == Key::Tab {
            return self.resync_after_tab();
        }
        if key != Key::Alt {
            return EventStatus::Ignored;
        }
        let alone = std::mem::take(&mut self.alt_pressed_alone);
        let mut status = EventStatus::Ignored;
        if alone && self.state != MenuBarState::Hidden {
            if self.state >= MenuBarState::Focused {
                self.set_state(MenuBarState::Visible);
            } else {
                self.focused_menu = self.first_navigable();
                if self.focused_menu.is_some() {
                    self.set_state(MenuBarState::Focused);
                }
            }
            status = EventStatus::Handled;
        }
        if self.state < MenuBarState::Focused {
            self.ctx.dom.remove_class(self.container, class::MNEMONICS_VISIBLE);
        }
        self.after_event();
        status
    }

    fn resync_after_tab(&mut self) -> EventStatus {
        let Some(index) = self.open_menu.filter(|_| self.state == MenuBarState::Open) else {
            return EventStatus::Ignored;
        };
        let mut env = self.ctx.env();
        if let Some(tree) = self.menus.get_mut(index).and_then(|entry| entry.tree.as_mut()) {
            tree.resync_innermost(&mut env);
        }
        self.after_event();
        EventStatus::Handled
    }

    fn route_key(&mut self, key: Key, modifiers: Modifiers) -> EventStatus {
        if self.state == MenuBarState::Hidden {
            return EventStatus::Ignored;
        }

        if self.state == MenuBarState::Open {
            if let Some(index) = self.open_menu {
                let mut env = self.ctx.env();
                let outcome = match self.menus.get_mut(index).and_then(|entry| entry.tree.as_mut()) {
                    Some(tree) => tree.on_key(&mut env, key, modifiers),
                    None => TreeOutcome::Ignored,
                };
                if outcome != TreeOutcome::Ignored {
                    return self.settle(outcome);
                }
            }
        }

        let command_keys = modifiers.intersects(Modifiers::CONTROL | Modifiers::SUPER);
        if modifiers.contains(Modifiers::ALT) && !command_keys && self.trigger_mnemonic(key) {
            return EventStatus::Handled;
        }
        if self.state != MenuBarState::Focused {
            return EventStatus::Ignored;
        }

        match key {
            Key::ArrowLeft => self.focus_adjacent_menu(false),
            Key::ArrowRight => self.focus_adjacent_menu(true),
            Key::ArrowDown | Key::Enter | Key::Space => {
                if let Some(index) = self.focused_menu {
                    self.trigger_menu(index, true);
                }
            },
            Key::Escape => self.set_state(MenuBarState::Visible),
            Key::Character(_) if !command_keys => {
                if !self.trigger_mnemonic(key) {
                    return EventStatus::Ignored;
                }
            },
            _ => return EventStatus::Ignored,
        }
        EventStatus::Handled
    }

    fn trigger_mnemonic(&mut self, key: Key) -> bool {
        if !self.ctx.config.enable_mnemonics {
            return false;
        }
        let Some(letter) = key.mnemonic_char() else {
            return false;
        };
        match self.mnemonics.dispatch(letter) {
            Some(MnemonicHit::Activate(index)) => {
                if self.open_menu != Some(index) {
                    self.trigger_menu(index, true);
                }
                true
            },
            Some(MnemonicHit::Focus(index)) => {
                self.focused_menu = Some(index);
                if self.state == MenuBarState::Focused {
                    self.set_focused_menu(Some(index));
                } else {
                    self.set_state(MenuBarState::Focused);
                }
                true
            },
            None => false,
        }
    }

    /// The primary button went down on `target`.
    ///
    /// Menus open on press rather than release; the release that follows is
    /// then ignored so it does not close the menu again.
    pub fn on_pointer_down(&mut self, target: ElementId) -> EventStatus {
        self.alt_pressed_alone = false;
        if self.state == MenuBarState::Hidden || self.in_open_tree(target) {
            return EventStatus::Ignored;
        }
        let Some(index) = self.button_of(target) else {
            return EventStatus::Ignored;
        };

        if self.state != MenuBarState::Open {
            self.ignore_next_mouse_up = true;
            self.trigger_menu(index, false);
        } else {
            self.ignore_next_mouse_up = false;
        }
        self.after_event();
        EventStatus::Handled
    }

    /// The primary button went up on `target`.
    pub fn on_pointer_up(&mut self, target: ElementId) -> EventStatus {
        if self.state == MenuBarState::Hidden || self.in_open_tree(target) {
            return EventStatus::Ignored;
        }
        let Some(index) = self.button_of(target) else {
            return EventStatus::Ignored;
        };

        if self.ignore_next_mouse_up {
            self.ignore_next_mouse_up = false;
        } else if self.state >= MenuBarState::Focused {
            self.trigger_menu(index, false);
        }
        self.after_event();
        EventStatus::Handled
    }

    /// The pointer moved onto `target`.
    pub fn on_pointer_enter(&mut self, target: ElementId) -> EventStatus {
        if self.state == MenuBarState::Hidden {
            return EventStatus::Ignored;
        }
        if self.in_open_tree(target) {
            let outcome = self.forward_pointer(target, PointerEvent::Enter);
            let status = self.settle(outcome);
            self.after_event();
            return status;
        }
        let Some(index) = self.button_of(target) else {
            return EventStatus::Ignored;
        };
        if !self.menus[index].is_navigable() {
            return EventStatus::Handled;
        }

        match self.state {
            MenuBarState::Open if self.open_menu != Some(index) => {
                if matches!(self.menus[index].node, MenuNode::Submenu(_)) {
                    self.set_focused_menu(Some(index));
                    self.open_menu_tree(index, false);
                }
            },
            MenuBarState::Focused => self.set_focused_menu(Some(index)),
            _ => {},
        }
        self.after_event();
        EventStatus::Handled
    }

    /// The pointer left `target`.
    pub fn on_pointer_leave(&mut self, target: ElementId) -> EventStatus {
        if !self.in_open_tree(target) {
            return EventStatus::Ignored;
        }
        let outcome = self.forward_pointer(target, PointerEvent::Leave);
        let status = self.settle(outcome);
        self.after_event();
        status
    }

    /// A click landed on `target`. Menu rows activate on click.
    pub fn on_click(&mut self, target: ElementId) -> EventStatus {
        if !self.in_open_tree(target) {
            return EventStatus::Ignored;
        }
        let outcome = self.forward_pointer(target, PointerEvent::Click);
        let status = self.settle(outcome);
        self.after_event();
        status
    }

    fn forward_pointer(&mut self, target: ElementId, event: PointerEvent) -> TreeOutcome {
        let Some(index) = self.open_menu else {
            return TreeOutcome::Ignored;
        };
        let mut env = self.ctx.env();
        match self.menus.get_mut(index).and_then(|entry| entry.tree.as_mut()) {
            Some(tree) => tree.on_pointer(&mut env, target, event),
            None => TreeOutcome::Ignored,
        }
    }

    fn settle(&mut self, outcome: TreeOutcome) -> EventStatus {
        match outcome {
            TreeOutcome::Ignored => return EventStatus::Ignored,
            TreeOutcome::Handled | TreeOutcome::CloseToParent => {},
            TreeOutcome::Cancel => self.set_state(MenuBarState::Focused),
            TreeOutcome::NavigateLeft => self.focus_adjacent_menu(false),
            TreeOutcome::NavigateRight => self.focus_adjacent_menu(true),
            TreeOutcome::Activated(command) => {
                log::trace!("Closing menus after command {}", command);
                self.set_state(MenuBarState::Visible);
            },
        }
        EventStatus::Handled
    }

    fn in_open_tree(&self, target: ElementId) -> bool {
        self.open_tree()
            .is_some_and(|tree| self.ctx.dom.contains(tree.container(), target))
    }

    fn button_of(&self, target: ElementId) -> Option<usize> {
        self.menus
            .iter()
            .position(|entry| self.ctx.dom.contains(entry.button, target))
    }

    fn first_navigable(&self) -> Option<usize> {
        self.menus.iter().position(MenuBarEntry::is_navigable)
    }

    /// Activate a top-level entry: open a menu or run a top-level command.
    fn trigger_menu(&mut self, index: usize, via_keyboard: bool) {
        let Some(entry) = self.menus.get(index) else {
            return;
        };
        if !entry.is_navigable() {
            return;
        }
        let command = match &entry.node {
            MenuNode::Leaf(leaf) => Some(leaf.command_id),
            MenuNode::Submenu(_) => None,
            MenuNode::Separator => return,
        };
        match command {
            Some(command) => self.run_command(index, command),
            None => self.on_menu_triggered(index, !via_keyboard),
        }
    }

    fn run_command(&mut self, index: usize, command: CommandId) {
        self.focused_menu = Some(index);
        log::debug!("Dispatching command {} from the menubar", command);
        if let Err(err) = self.ctx.dispatcher.dispatch(command) {
            log::warn!("Command {} failed: {}", command, err);
        }
        self.set_state(MenuBarState::Visible);
    }

    /// Open, move or toggle the top-level menu at `index`.
    fn on_menu_triggered(&mut self, index: usize, clicked: bool) {
        if self.state == MenuBarState::Open {
            if self.open_menu == Some(index) {
                self.set_state(MenuBarState::Visible);
            } else {
                self.set_focused_menu(Some(index));
                self.open_menu_tree(index, !clicked);
            }
        } else {
            self.focused_menu = Some(index);
            self.opened_via_keyboard = !clicked;
            self.set_state(MenuBarState::Open);
        }
    }

    fn focus_adjacent_menu(&mut self, forward: bool) {
        let Some(current) = self.focused_menu else {
            return;
        };
        let len = self.menus.len();
        let next = (1..len)
            .map(|step| {
                if forward {
                    (current + step) % len
                } else {
                    (current + len - step) % len
                }
            })
            .find(|&i| self.menus[i].is_navigable());
        let Some(next) = next else {
            return;
        };

        match self.state {
            MenuBarState::Open => {
                if matches!(self.menus[next].node, MenuNode::Submenu(_)) {
                    self.set_focused_menu(Some(next));
                    self.open_menu_tree(next, true);
                } else {
                    self.focused_menu = Some(next);
                    self.set_state(MenuBarState::Focused);
                }
            },
            MenuBarState::Focused => self.set_focused_menu(Some(next)),
            _ => {},
        }
    }

    fn set_focused_menu(&mut self, index: Option<usize>) {
        self.focused_menu = index;
        let mut env = self.ctx.env();
        for (i, entry) in self.menus.iter().enumerate() {
            let selected = index == Some(i);
            env.dom.toggle_class(entry.button, class::FOCUSED, selected);
            env.paint_row(entry.button, selected);
        }
        if let Some(entry) = index.and_then(|i| self.menus.get(i)) {
            env.dom.focus(entry.button);
        }
    }

    fn open_menu_tree(&mut self, index: usize, select_first: bool) -> bool {
        self.close_open_menu();

        let mut env = self.ctx.env();
        let Some(entry) = self.menus.get_mut(index) else {
            return false;
        };
        let MenuNode::Submenu(description) = &entry.node else {
            return false;
        };
        if !(description.enabled && description.visible) {
            return false;
        }

        let anchor = Anchor::Below(env.dom.rect(entry.button));
        env.dom.add_class(entry.button, class::OPEN);
        env.dom.set_attribute(entry.button, "aria-expanded", "true");
        let mut tree = MenuTree::build(
            &mut env,
            &description.children,
            entry.button,
            vec![index],
            0,
            anchor,
        );
        let target = if select_first {
            FocusTarget::SelectFirst
        } else {
            FocusTarget::Container
        };
        tree.focus(&mut env, target);
        entry.tree = Some(tree);
        self.open_menu = Some(index);
        true
    }

    fn close_open_menu(&mut self) {
        let Some(index) = self.open_menu else {
            return;
        };
        let mut env = self.ctx.env();
        if let Some(entry) = self.menus.get_mut(index) {
            if let Some(tree) = entry.tree.as_mut() {
                tree.dispose(&mut env);
            }
            entry.tree = None;
            env.dom.remove_class(entry.button, class::OPEN);
            env.dom.set_attribute(entry.button, "aria-expanded", "false");
        }
        self.open_menu = None;
    }

    fn set_state(&mut self, state: MenuBarState) {
        let previous = self.state;
        if previous == state {
            return;
        }
        log::debug!("Menubar state {:?} -> {:?}", previous, state);

        if previous < MenuBarState::Focused && state >= MenuBarState::Focused {
            let dom = &self.ctx.dom;
            self.focus_to_return = dom.focused().filter(|f| !dom.contains(self.container, *f));
        }
        if previous == MenuBarState::Open {
            self.close_open_menu();
        }
        self.state = state;

        let dom = &mut self.ctx.dom;
        dom.toggle_class(self.container, class::HIDDEN, state == MenuBarState::Hidden);
        dom.toggle_class(
            self.container,
            class::MNEMONICS_VISIBLE,
            state >= MenuBarState::Focused,
        );

        match state {
            MenuBarState::Hidden | MenuBarState::Visible => {
                self.set_focused_menu(None);
                if previous >= MenuBarState::Focused {
                    self.restore_focus();
                }
            },
            MenuBarState::Focused => {
                if self.focused_menu.is_none() {
                    self.focused_menu = self.first_navigable();
                }
                self.set_focused_menu(self.focused_menu);
            },
            MenuBarState::Open => {
                let opened = match self.focused_menu {
                    Some(index) => {
                        self.set_focused_menu(Some(index));
                        self.open_menu_tree(index, self.opened_via_keyboard)
                    },
                    None => false,
                };
                if !opened {
                    log::warn!("Nothing to open, staying focused");
                    self.state = MenuBarState::Focused;
                }
            },
        }
    }

    fn restore_focus(&mut self) {
        let dom = &mut self.ctx.dom;
        match self.focus_to_return.take() {
            Some(element) if dom.is_connected(element) => dom.focus(element),
            _ => {
                if dom.has_focus_within(self.container) {
                    dom.blur();
                }
            },
        }
    }

    fn paint_bar(&mut self) {
        let focused = self.focused_menu.filter(|_| self.state >= MenuBarState::Focused);
        let mut env = self.ctx.env();
        env.paint_container(self.container);
        for (i, entry) in self.menus.iter().enumerate() {
            env.paint_row(entry.button, focused == Some(i));
        }
    }

    fn after_event(&mut self) {
        let Some(index) = self.open_menu else {
            return;
        };
        let mut env = self.ctx.env();
        if let Some(tree) = self.menus.get_mut(index).and_then(|entry| entry.tree.as_mut()) {
            tree.sync_focus(&mut env);
        }
    }
}

impl std::fmt::Debug for MenuBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuBar")
            .field("state", &self.state)
            .field("menus", &self.menus.len())
            .field("focused_menu", &self.focused_menu)
            .field("open_menu", &self.open_menu)
            .finish()
    }
}
