// SPDX-License-Identifier: MIT OR Apache-2.0
//! A rendered, navigable menu.
//!
//! The same [MenuTree] is used at every nesting depth. It owns its rows, tracks
//! the focused row, dispatches mnemonics and holds the single open-submenu slot
//! of its level.
//!
//! # Events
//!
//! Keys go to the innermost open tree that holds focus. Pointer events go to the
//! tree whose rows contain the target element. Both report a [TreeOutcome] to
//! the owner, which is how a nested tree asks to be closed and how activations
//! and Left/Right navigation reach the menubar.

use crate::dom::{ElementId, StyleValue};
use crate::keys::{Key, Modifiers};
use crate::menu::constants::class;
use crate::menu::context::{FocusTarget, MenuEnv, MenuTimer, PointerEvent, TreeOutcome};
use crate::menu::description::{LeafKind, MenuNode};
use crate::menu::item::MenuItemNode;
use crate::menu::mnemonic::{MnemonicHit, MnemonicIndex};
use crate::menu::position::{estimate_menu_size, layout_rows, Anchor};
use crate::menu::radio;
use crate::menu::submenu::SubmenuSignal;
use crate::timer::TimerHandle;

/// A menu container and its rows.
#[derive(Debug)]
pub struct MenuTree {
    container: ElementId,
    items: Vec<MenuItemNode>,
    focused: Option<usize>,
    mnemonics: MnemonicIndex,
    open_submenu: Option<usize>,
    path: Vec<usize>,
    depth: usize,
    disposed: bool,
}

impl MenuTree {
    /// Render `nodes` into a new container appended to `parent`.
    ///
    /// `path` is the timer address of the owning submenu node (or of the
    /// menubar entry for a top-level tree) and `depth` is 0 for top-level trees.
    pub fn build(
        env: &mut MenuEnv<'_>,
        nodes: &[MenuNode],
        parent: ElementId,
        path: Vec<usize>,
        depth: usize,
        anchor: Anchor,
    ) -> Self {
        let container = env.dom.create_with_class("ul", class::MENU_CONTAINER);
        env.dom.set_attribute(container, "role", "menu");

        let mut items = Vec::with_capacity(nodes.len());
        let mut mnemonics = MnemonicIndex::new();
        for (index, node) in nodes.iter().enumerate() {
            let mut item_path = path.clone();
            item_path.push(index);
            let item = MenuItemNode::render(env, node, item_path, depth);
            env.dom.append_child(container, item.element());

            if env.config.enable_mnemonics && item.is_focusable() {
                if let Some(letter) = item.mnemonic() {
                    mnemonics.register(letter, index);
                }
            }
            items.push(item);
        }

        let size = estimate_menu_size(nodes);
        let placement = anchor.place(size, env.viewport.width, env.config.flip_inset);
        let rect = placement.rect(size);
        env.dom.set_rect(container, rect);
        env.dom.set_style(container, "left", StyleValue::Px(rect.x0));
        env.dom.set_style(container, "top", StyleValue::Px(rect.y0));
        env.dom.toggle_class(container, class::FLIPPED, placement.flipped);
        for (item, row) in items.iter().zip(layout_rows(rect, nodes)) {
            env.dom.set_rect(item.element(), row);
        }
        env.paint_container(container);

        env.dom.append_child(parent, container);
        log::debug!(
            "Built menu tree at depth {} with {} items ({} mnemonics)",
            depth,
            items.len(),
            mnemonics.len()
        );

        Self {
            container,
            items,
            focused: None,
            mnemonics,
            open_submenu: None,
            path,
            depth,
            disposed: false,
        }
    }

    /// The container element.
    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Rows in display order.
    pub fn items(&self) -> &[MenuItemNode] {
        &self.items
    }

    /// Row at `index`.
    pub fn item(&self, index: usize) -> Option<&MenuItemNode> {
        self.items.get(index)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tree has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The focused row, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Nesting depth. Top-level trees are at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Timer address prefix of this tree.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Mnemonic registrations of this tree.
    pub fn mnemonics(&self) -> &MnemonicIndex {
        &self.mnemonics
    }

    /// Whether [dispose](Self::dispose) ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Index of the row whose submenu is open.
    pub fn open_submenu(&self) -> Option<usize> {
        self.open_submenu
    }

    /// The open nested tree, if any.
    pub fn open_child(&self) -> Option<&MenuTree> {
        self.open_submenu.and_then(|i| self.child(i))
    }

    /// Mutable access to the open nested tree.
    pub fn open_child_mut(&mut self) -> Option<&mut MenuTree> {
        let index = self.open_submenu?;
        self.child_mut(index)
    }

    /// The innermost open tree below (or equal to) this one.
    pub fn deepest(&self) -> &MenuTree {
        match self.open_child() {
            Some(child) => child.deepest(),
            None => self,
        }
    }

    fn child(&self, index: usize) -> Option<&MenuTree> {
        self.items
            .get(index)
            .and_then(MenuItemNode::as_submenu)
            .and_then(|sub| sub.child())
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut MenuTree> {
        self.items
            .get_mut(index)
            .and_then(MenuItemNode::as_submenu_mut)
            .and_then(|sub| sub.child_mut())
    }

    /// Move focus into the tree.
    pub fn focus(&mut self, env: &mut MenuEnv<'_>, target: FocusTarget) {
        match target {
            FocusTarget::Index(index) => {
                if self.items.get(index).is_some_and(MenuItemNode::is_focusable) {
                    self.set_focus(env, Some(index));
                } else {
                    log::trace!("Cannot focus row {} at depth {}", index, self.depth);
                }
            },
            FocusTarget::SelectFirst => self.select_first(env),
            FocusTarget::Default => match self.focused {
                Some(index) => self.set_focus(env, Some(index)),
                None => self.select_first(env),
            },
            FocusTarget::Container => self.set_focus(env, None),
        }
    }

    fn select_first(&mut self, env: &mut MenuEnv<'_>) {
        // scanning forward from the last row lands on the first navigable one
        self.unselect(env);
        self.focused = self.items.len().checked_sub(1);
        self.focus_next(env);
    }

    fn select_last(&mut self, env: &mut MenuEnv<'_>) {
        self.unselect(env);
        self.focused = if self.items.is_empty() { None } else { Some(0) };
        self.focus_previous(env);
    }

    /// Focus the next navigable row, wrapping around.
    ///
    /// Visits every row at most once. When none is navigable the container
    /// takes focus and no row is selected.
    pub fn focus_next(&mut self, env: &mut MenuEnv<'_>) {
        let len = self.items.len();
        if len == 0 {
            self.set_focus(env, None);
            return;
        }
        let start = self.focused.unwrap_or(len - 1);
        let next = (1..=len)
            .map(|step| (start + step) % len)
            .find(|&i| self.items[i].is_focusable());
        self.set_focus(env, next);
    }

    /// Focus the previous navigable row, wrapping around.
    pub fn focus_previous(&mut self, env: &mut MenuEnv<'_>) {
        let len = self.items.len();
        if len == 0 {
            self.set_focus(env, None);
            return;
        }
        let start = self.focused.unwrap_or(0);
        let previous = (1..=len)
            .map(|step| (start + len - step) % len)
            .find(|&i| self.items[i].is_focusable());
        self.set_focus(env, previous);
    }

    fn unselect(&mut self, env: &mut MenuEnv<'_>) {
        if let Some(previous) = self.focused.take() {
            if let Some(item) = self.items.get_mut(previous) {
                item.set_selected(env, false);
            }
        }
    }

    fn set_focus(&mut self, env: &mut MenuEnv<'_>, index: Option<usize>) {
        if self.focused != index {
            self.unselect(env);
        }
        self.focused = index;
        match index.and_then(|i| self.items.get_mut(i)) {
            Some(item) => {
                item.set_selected(env, true);
                env.dom.focus(item.element());
            },
            None => {
                self.focused = None;
                env.dom.focus(self.container);
            },
        }
    }

    /// Re-read the focused row from the element tree.
    ///
    /// Tab lets the host move focus on its own, so the model follows afterwards.
    pub fn resync_focus(&mut self, env: &mut MenuEnv<'_>) {
        let settled = env
            .dom
            .focused()
            .and_then(|f| self.items.iter().position(|item| env.dom.contains(item.element(), f)));
        match settled {
            Some(index) if self.items[index].is_focusable() => self.set_focus(env, Some(index)),
            _ => self.unselect(env),
        }
    }

    /// Re-read the focused row of the innermost open tree.
    ///
    /// Called once Tab is released and the host has settled focus.
    pub fn resync_innermost(&mut self, env: &mut MenuEnv<'_>) {
        if let Some(child) = self.open_child_mut() {
            child.resync_innermost(env);
            return;
        }
        self.resync_focus(env);
    }

    /// Handle a key press.
    pub fn on_key(&mut self, env: &mut MenuEnv<'_>, key: Key, modifiers: Modifiers) -> TreeOutcome {
        if let Some(index) = self.open_submenu {
            let child_focused = self
                .child(index)
                .is_some_and(|child| env.dom.has_focus_within(child.container()));
            if child_focused {
                let outcome = match self.child_mut(index) {
                    Some(child) => child.on_key(env, key, modifiers),
                    None => TreeOutcome::Ignored,
                };
                return self.settle_child_outcome(env, index, outcome);
            }
        }

        match key {
            Key::ArrowUp => {
                self.focus_previous(env);
                TreeOutcome::Handled
            },
            Key::ArrowDown => {
                self.focus_next(env);
                TreeOutcome::Handled
            },
            Key::Home => {
                self.select_first(env);
                TreeOutcome::Handled
            },
            Key::End => {
                self.select_last(env);
                TreeOutcome::Handled
            },
            Key::Enter | Key::Space => match self.focused {
                Some(index) => self.activate(env, index),
                None => TreeOutcome::Ignored,
            },
            Key::ArrowRight => match self.focused {
                Some(index) if self.items[index].as_submenu().is_some() => {
                    self.open_submenu_at(env, index, FocusTarget::SelectFirst);
                    TreeOutcome::Handled
                },
                _ => TreeOutcome::NavigateRight,
            },
            Key::ArrowLeft => {
                if self.depth > 0 {
                    TreeOutcome::CloseToParent
                } else {
                    TreeOutcome::NavigateLeft
                }
            },
            Key::Escape => TreeOutcome::Cancel,
            Key::Character(_) => self.on_mnemonic(env, key, modifiers),
            // the host moves focus for Tab; see resync_innermost
            Key::Tab | Key::Alt | Key::Other => TreeOutcome::Ignored,
        }
    }

    fn on_mnemonic(&mut self, env: &mut MenuEnv<'_>, key: Key, modifiers: Modifiers) -> TreeOutcome {
        if !env.config.enable_mnemonics || modifiers.intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::SUPER) {
            return TreeOutcome::Ignored;
        }
        let Some(letter) = key.mnemonic_char() else {
            return TreeOutcome::Ignored;
        };
        match self.mnemonics.dispatch(letter) {
            Some(MnemonicHit::Activate(index)) => {
                self.set_focus(env, Some(index));
                self.activate(env, index)
            },
            Some(MnemonicHit::Focus(index)) => {
                self.set_focus(env, Some(index));
                TreeOutcome::Handled
            },
            None => TreeOutcome::Ignored,
        }
    }

    /// Handle a pointer event on `target`.
    pub fn on_pointer(&mut self, env: &mut MenuEnv<'_>, target: ElementId, event: PointerEvent) -> TreeOutcome {
        let Some(index) = self.row_of(env, target) else {
            return TreeOutcome::Ignored;
        };

        let in_child = self
            .child(index)
            .is_some_and(|child| env.dom.contains(child.container(), target));
        if in_child {
            let outcome = match self.child_mut(index) {
                Some(child) => child.on_pointer(env, target, event),
                None => TreeOutcome::Ignored,
            };
            return self.settle_child_outcome(env, index, outcome);
        }

        match event {
            PointerEvent::Enter => {
                if self.items[index].is_focusable() {
                    self.set_focus(env, Some(index));
                }
                if let Some(sub) = self.items[index].as_submenu_mut() {
                    sub.pointer_enter(env);
                }
                TreeOutcome::Handled
            },
            PointerEvent::Leave => {
                if let Some(sub) = self.items[index].as_submenu_mut() {
                    sub.pointer_leave(env);
                }
                TreeOutcome::Handled
            },
            PointerEvent::Click => self.activate(env, index),
        }
    }

    fn row_of(&self, env: &MenuEnv<'_>, target: ElementId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| env.dom.contains(item.element(), target))
    }

    fn settle_child_outcome(&mut self, env: &mut MenuEnv<'_>, index: usize, outcome: TreeOutcome) -> TreeOutcome {
        match outcome {
            TreeOutcome::Cancel | TreeOutcome::CloseToParent => {
                self.close_submenu(env);
                self.set_focus(env, Some(index));
                TreeOutcome::Handled
            },
            other => other,
        }
    }

    /// Activate the row at `index`: run a leaf or open a submenu.
    ///
    /// Separators and rows that are disabled or hidden do nothing.
    pub fn activate(&mut self, env: &mut MenuEnv<'_>, index: usize) -> TreeOutcome {
        let Some(item) = self.items.get(index) else {
            return TreeOutcome::Ignored;
        };
        if !item.is_focusable() {
            log::trace!("Ignoring activation of inert row {}", index);
            return TreeOutcome::Handled;
        }
        if item.as_submenu().is_some() {
            self.open_submenu_at(env, index, FocusTarget::SelectFirst);
            return TreeOutcome::Handled;
        }
        self.activate_leaf(env, index)
    }

    fn activate_leaf(&mut self, env: &mut MenuEnv<'_>, index: usize) -> TreeOutcome {
        let Some(action) = self.items.get_mut(index).and_then(MenuItemNode::as_action_mut) else {
            return TreeOutcome::Ignored;
        };
        let command = action.command_id();

        let snapshot = match action.kind() {
            LeafKind::Normal => None,
            LeafKind::Checkbox => {
                let was_checked = action.is_checked();
                action.set_checked(env, !was_checked);
                Some(vec![(index, was_checked)])
            },
            LeafKind::Radio => Some(radio::update_radio_group(&mut self.items, index, env)),
        };

        log::debug!("Dispatching command {}", command);
        if let Err(err) = env.dispatcher.dispatch(command) {
            log::warn!("Command {} failed: {}", command, err);
            if let Some(snapshot) = snapshot {
                radio::restore_checked(&mut self.items, &snapshot, env);
            }
        }
        TreeOutcome::Activated(command)
    }

    /// Open the submenu at `index`, closing whichever sibling was open.
    pub fn open_submenu_at(&mut self, env: &mut MenuEnv<'_>, index: usize, target: FocusTarget) {
        let openable = self
            .items
            .get(index)
            .and_then(MenuItemNode::as_submenu)
            .is_some_and(|sub| sub.is_focusable());
        if !openable {
            return;
        }

        if self.open_submenu != Some(index) {
            self.close_submenu(env);
            self.set_focus(env, Some(index));
        }
        if let Some(sub) = self.items[index].as_submenu_mut() {
            sub.open(env, target);
        }
        self.open_submenu = Some(index);
    }

    /// Close the open submenu, if any.
    pub fn close_submenu(&mut self, env: &mut MenuEnv<'_>) {
        let Some(index) = self.open_submenu else {
            return;
        };
        // the child tree goes first, then the slot
        if let Some(sub) = self.items.get_mut(index).and_then(MenuItemNode::as_submenu_mut) {
            sub.close(env);
        }
        self.open_submenu = None;
    }

    /// Route a fired timer to the submenu node it addresses.
    pub fn on_timer(&mut self, env: &mut MenuEnv<'_>, handle: TimerHandle, timer: &MenuTimer) {
        let Some(rest) = timer.path.strip_prefix(self.path.as_slice()) else {
            return;
        };
        let Some((&index, deeper)) = rest.split_first() else {
            return;
        };

        if !deeper.is_empty() {
            if let Some(child) = self.child_mut(index) {
                child.on_timer(env, handle, timer);
            }
            return;
        }

        let signal = match self.items.get_mut(index).and_then(MenuItemNode::as_submenu_mut) {
            Some(sub) => sub.on_timer(env, handle, timer.kind),
            None => SubmenuSignal::Nothing,
        };
        match signal {
            SubmenuSignal::Open => {
                log::trace!("Hover opened submenu {:?}", timer.path);
                self.open_submenu_at(env, index, FocusTarget::Container);
            },
            SubmenuSignal::Close => {
                if self.open_submenu == Some(index) {
                    log::trace!("Focus left submenu {:?}", timer.path);
                    self.close_submenu(env);
                }
            },
            SubmenuSignal::Nothing => {},
        }
    }

    /// Arm or cancel focus-out timers of open submenus after focus moved.
    pub fn sync_focus(&mut self, env: &mut MenuEnv<'_>) {
        if let Some(index) = self.open_submenu {
            if let Some(sub) = self.items.get_mut(index).and_then(MenuItemNode::as_submenu_mut) {
                sub.sync_focus(env);
            }
        }
    }

    /// Re-apply the current style to this tree and every open descendant.
    pub fn restyle(&mut self, env: &mut MenuEnv<'_>) {
        env.paint_container(self.container);
        let focused = self.focused;
        for (index, item) in self.items.iter_mut().enumerate() {
            item.restyle(env, focused == Some(index));
        }
    }

    /// Tear down every row, nested trees included, and detach the container.
    ///
    /// A second call does nothing.
    pub fn dispose(&mut self, env: &mut MenuEnv<'_>) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        for item in &mut self.items {
            item.dispose(env);
        }
        self.open_submenu = None;
        self.focused = None;
        self.mnemonics.clear();
        env.dom.remove(self.container);
        log::trace!("Disposed menu tree at depth {}", self.depth);
    }
}
