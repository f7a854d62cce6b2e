// SPDX-License-Identifier: MIT OR Apache-2.0
//! Item nodes of a menu tree.
//!
//! Every row of a tree is one [MenuItemNode]: a separator, a command leaf or
//! a submenu trigger. Each node owns its `li` element and the spans inside it.

use std::ops::Range;

use crate::dom::ElementId;
use crate::keys::{format_accelerator, parse_mnemonic};
use crate::menu::commands::CommandId;
use crate::menu::constants::{class, CHECK_GLYPH, RADIO_GLYPH};
use crate::menu::context::MenuEnv;
use crate::menu::description::{LeafItem, LeafKind, MenuIcon, MenuNode};
use crate::menu::submenu::SubmenuNode;

/// One row of a menu tree.
#[derive(Debug)]
pub enum MenuItemNode {
    /// A separator line. Never focusable.
    Separator(SeparatorItem),
    /// A command leaf.
    Action(ActionItem),
    /// A trigger owning a nested tree.
    Submenu(SubmenuNode),
}

impl MenuItemNode {
    /// Render a description node. `path` addresses the node for timer routing.
    pub fn render(env: &mut MenuEnv<'_>, node: &MenuNode, path: Vec<usize>, depth: usize) -> Self {
        match node {
            MenuNode::Separator => MenuItemNode::Separator(SeparatorItem::render(env)),
            MenuNode::Leaf(leaf) => MenuItemNode::Action(ActionItem::render(env, leaf.clone())),
            MenuNode::Submenu(sub) => {
                MenuItemNode::Submenu(SubmenuNode::render(env, sub.clone(), path, depth + 1))
            },
        }
    }

    /// The row element.
    pub fn element(&self) -> ElementId {
        match self {
            MenuItemNode::Separator(sep) => sep.element,
            MenuItemNode::Action(action) => action.element,
            MenuItemNode::Submenu(sub) => sub.element(),
        }
    }

    /// Check if this is a separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItemNode::Separator(_))
    }

    /// Whether keyboard navigation and mnemonics may land on this row.
    pub fn is_focusable(&self) -> bool {
        match self {
            MenuItemNode::Separator(_) => false,
            MenuItemNode::Action(action) => action.leaf.enabled && action.leaf.visible,
            MenuItemNode::Submenu(sub) => sub.is_focusable(),
        }
    }

    /// Mnemonic letter of the label, lower-cased.
    pub fn mnemonic(&self) -> Option<char> {
        match self {
            MenuItemNode::Separator(_) => None,
            MenuItemNode::Action(action) => action.mnemonic,
            MenuItemNode::Submenu(sub) => sub.mnemonic(),
        }
    }

    /// The leaf, if this row is one.
    pub fn as_action(&self) -> Option<&ActionItem> {
        match self {
            MenuItemNode::Action(action) => Some(action),
            _ => None,
        }
    }

    /// Mutable access to the leaf.
    pub fn as_action_mut(&mut self) -> Option<&mut ActionItem> {
        match self {
            MenuItemNode::Action(action) => Some(action),
            _ => None,
        }
    }

    /// The submenu trigger, if this row is one.
    pub fn as_submenu(&self) -> Option<&SubmenuNode> {
        match self {
            MenuItemNode::Submenu(sub) => Some(sub),
            _ => None,
        }
    }

    /// Mutable access to the submenu trigger.
    pub fn as_submenu_mut(&mut self) -> Option<&mut SubmenuNode> {
        match self {
            MenuItemNode::Submenu(sub) => Some(sub),
            _ => None,
        }
    }

    /// Show or clear the selection highlight.
    pub fn set_selected(&mut self, env: &mut MenuEnv<'_>, selected: bool) {
        if self.is_separator() {
            return;
        }
        let element = self.element();
        env.dom.toggle_class(element, class::FOCUSED, selected);
        env.paint_row(element, selected);
    }

    /// Re-apply the current style, recursing into an open submenu.
    pub fn restyle(&mut self, env: &mut MenuEnv<'_>, selected: bool) {
        match self {
            MenuItemNode::Separator(sep) => env.paint_separator(sep.element),
            MenuItemNode::Action(action) => env.paint_row(action.element, selected),
            MenuItemNode::Submenu(sub) => sub.restyle(env, selected),
        }
    }

    /// Release the row and everything below it. Safe to call twice.
    pub fn dispose(&mut self, env: &mut MenuEnv<'_>) {
        match self {
            MenuItemNode::Separator(sep) => {
                env.dom.remove(sep.element);
            },
            MenuItemNode::Action(action) => {
                env.dom.remove(action.element);
            },
            MenuItemNode::Submenu(sub) => sub.dispose(env),
        }
    }
}

/// A separator row.
#[derive(Debug)]
pub struct SeparatorItem {
    element: ElementId,
}

impl SeparatorItem {
    fn render(env: &mut MenuEnv<'_>) -> Self {
        let element = env.dom.create_with_class("li", class::SEPARATOR);
        env.dom.set_attribute(element, "role", "separator");
        env.paint_separator(element);
        Self { element }
    }

    /// The row element.
    pub fn element(&self) -> ElementId {
        self.element
    }
}

/// A command leaf: normal, checkbox or radio.
#[derive(Debug)]
pub struct ActionItem {
    element: ElementId,
    check: ElementId,
    label: ElementId,
    icon: Option<ElementId>,
    keybinding: Option<ElementId>,
    leaf: LeafItem,
    mnemonic: Option<char>,
    radio_group: Option<Range<usize>>,
}

impl ActionItem {
    fn render(env: &mut MenuEnv<'_>, leaf: LeafItem) -> Self {
        let element = env.dom.create_with_class("li", class::ACTION_ITEM);
        let role = match leaf.kind {
            LeafKind::Normal => "menuitem",
            LeafKind::Checkbox => "menuitemcheckbox",
            LeafKind::Radio => "menuitemradio",
        };
        env.dom.set_attribute(element, "role", role);

        let check = env.dom.create_with_class("span", class::CHECK);
        env.dom.append_child(element, check);

        let icon = leaf.icon.as_ref().and_then(|icon| match icon {
            MenuIcon::Text { glyph } => {
                let span = env.dom.create_with_class("span", class::ICON);
                env.dom.set_text(span, glyph.as_str());
                Some(span)
            },
            MenuIcon::Image => match env.icons.resolve(leaf.command_id) {
                Some(url) => {
                    let img = env.dom.create_with_class("img", class::ICON);
                    env.dom.set_attribute(img, "src", url);
                    Some(img)
                },
                None => {
                    log::debug!("No icon resolved for command {}", leaf.command_id);
                    None
                },
            },
        });
        if let Some(icon) = icon {
            env.dom.append_child(element, icon);
        }

        let parsed = parse_mnemonic(&leaf.label);
        let label = env.dom.create_with_class("span", class::LABEL);
        env.dom.set_text(label, parsed.display_text);
        if let Some(index) = parsed.mnemonic_index {
            env.dom.set_attribute(label, "data-mnemonic-index", index.to_string());
        }
        env.dom.append_child(element, label);

        let keybinding = leaf.accelerator.as_deref().map(|accel| {
            let span = env.dom.create_with_class("span", class::KEYBINDING);
            env.dom.set_text(span, format_accelerator(accel));
            span
        });
        if let Some(span) = keybinding {
            env.dom.append_child(element, span);
        }

        if !leaf.enabled {
            env.dom.add_class(element, class::DISABLED);
            env.dom.set_attribute(element, "aria-disabled", "true");
        }
        if !leaf.visible {
            env.dom.add_class(element, class::HIDDEN);
        }
        env.paint_row(element, false);

        let mut item = Self {
            element,
            check,
            label,
            icon,
            keybinding,
            leaf,
            mnemonic: parsed.mnemonic,
            radio_group: None,
        };
        item.render_checked(env);
        item
    }

    /// The row element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The label span.
    pub fn label_element(&self) -> ElementId {
        self.label
    }

    /// The icon element, if an icon is shown.
    pub fn icon_element(&self) -> Option<ElementId> {
        self.icon
    }

    /// The keybinding span, if the leaf has an accelerator.
    pub fn keybinding_element(&self) -> Option<ElementId> {
        self.keybinding
    }

    /// The description this row was rendered from, with the local checked state.
    pub fn leaf(&self) -> &LeafItem {
        &self.leaf
    }

    /// Command reported on activation.
    pub fn command_id(&self) -> CommandId {
        self.leaf.command_id
    }

    /// Normal, checkbox or radio.
    pub fn kind(&self) -> LeafKind {
        self.leaf.kind
    }

    /// Local checked state.
    pub fn is_checked(&self) -> bool {
        self.leaf.checked
    }

    /// Update the checked state and its check mark.
    pub fn set_checked(&mut self, env: &mut MenuEnv<'_>, checked: bool) {
        self.leaf.checked = checked;
        self.render_checked(env);
    }

    /// Radio group range cached by the last radio click.
    pub fn radio_group(&self) -> Option<Range<usize>> {
        self.radio_group.clone()
    }

    pub(crate) fn set_radio_group(&mut self, group: Range<usize>) {
        self.radio_group = Some(group);
    }

    fn render_checked(&mut self, env: &mut MenuEnv<'_>) {
        let glyph = match (self.leaf.kind, self.leaf.checked) {
            (LeafKind::Checkbox, true) => CHECK_GLYPH,
            (LeafKind::Radio, true) => RADIO_GLYPH,
            _ => "",
        };
        env.dom.set_text(self.check, glyph);
        env.dom
            .toggle_class(self.element, class::CHECKED, self.leaf.checked && self.leaf.kind != LeafKind::Normal);
        if self.leaf.kind != LeafKind::Normal {
            env.dom.set_attribute(
                self.element,
                "aria-checked",
                if self.leaf.checked { "true" } else { "false" },
            );
        }
    }
}
